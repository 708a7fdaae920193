/*
 * Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Errors reported by network construction and flow computation.

use std::error;
use std::fmt;

/// Error on an invalid call to a network or solver method.
///
/// Every error is detected before any state is modified, so a failed
/// call leaves the network unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node index is not in `0..num_nodes`.
    IndexOutOfRange { index: usize, num_nodes: usize },
    /// An argument violates a precondition, e.g. a negative capacity or
    /// equal source and sink.
    InvalidArgument { msg: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            IndexOutOfRange { index, num_nodes } => {
                write!(fmt, "Node index {} out of range (number of nodes: {})", index, num_nodes)
            }
            InvalidArgument { msg } => write!(fmt, "Invalid argument: {}", msg),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
