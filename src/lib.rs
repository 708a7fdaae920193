// Copyright (c) 2023 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Maximum flow and minimum cut on dense capacitated networks.
//!
//! The flow is computed with the incremental search tree algorithm of
//! Boykov and Kolmogorov.
//!
//! # Example
//!
//! ```
//! use bk_flow::BoykovKolmogorov;
//!
//! let mut bk = BoykovKolmogorov::<i64>::new(4);
//! bk.add_edge(0, 1, 10).unwrap();
//! bk.add_edge(0, 2, 10).unwrap();
//! bk.add_edge(1, 3, 4).unwrap();
//! bk.add_edge(2, 3, 9).unwrap();
//!
//! assert_eq!(bk.solve(0, 3), Ok(13));
//! assert_eq!(bk.mincut(), vec![0, 1, 2]);
//! ```

mod num {
    pub use num_traits as traits;
}

pub mod error;
pub use self::error::{Error, Result};

pub mod network;
pub use self::network::Network;

// # Algorithms

pub mod maxflow;
pub use self::maxflow::{boykov_kolmogorov, BoykovKolmogorov, Tree};
