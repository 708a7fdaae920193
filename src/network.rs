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

//! A dense capacitated network with a fixed number of nodes.
//!
//! # Example
//!
//! ```
//! use bk_flow::Network;
//!
//! let mut net = Network::<i32>::new(3);
//! net.add_edge(0, 1, 5).unwrap();
//! net.add_edge(1, 2, 3).unwrap();
//!
//! assert_eq!(net.capacity(0, 1), Ok(5));
//! assert_eq!(net.capacity(1, 0), Ok(0));
//! assert_eq!(net.residual(1, 2), Ok(3));
//! assert!(net.add_edge(0, 3, 1).is_err());
//! assert!(net.add_edge(0, 2, -1).is_err());
//! ```

use crate::error::{Error, Result};
use crate::num::traits::{NumAssign, Signed};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A network on the nodes `0..n`.
///
/// Capacities and flows are stored in two `n x n` matrices in row-major
/// order. The flow matrix is kept antisymmetric, i.e. `flow(u, v) ==
/// -flow(v, u)` for all pairs of nodes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Network<F> {
    /// The number of nodes.
    n: usize,
    /// The capacity of each ordered pair of nodes.
    capacity: Vec<F>,
    /// The (signed) flow on each ordered pair of nodes.
    flow: Vec<F>,
    // The undirected adjacency lists. Each call to `add_edge` appends the
    // endpoints to each other's list, so parallel edges lead to duplicate
    // entries.
    neighs: Vec<Vec<usize>>,
}

impl<F> Network<F>
where
    F: NumAssign + Signed + Ord + Copy,
{
    /// Create a network with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        Network {
            n,
            capacity: vec![F::zero(); n * n],
            flow: vec![F::zero(); n * n],
            neighs: vec![vec![]; n],
        }
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Set the capacity of the directed edge `u -> v`.
    ///
    /// A previous capacity of the same ordered pair is overwritten, not
    /// increased. The capacity of `v -> u` is not changed.
    pub fn add_edge(&mut self, u: usize, v: usize, cap: F) -> Result<()> {
        self.check_node(u)?;
        self.check_node(v)?;
        if cap < F::zero() {
            return Err(Error::InvalidArgument {
                msg: format!("negative capacity on edge ({}, {})", u, v),
            });
        }

        self.capacity[u * self.n + v] = cap;
        self.neighs[u].push(v);
        self.neighs[v].push(u);
        Ok(())
    }

    /// Return the capacity of the directed edge `u -> v`.
    pub fn capacity(&self, u: usize, v: usize) -> Result<F> {
        self.check_node(u)?;
        self.check_node(v)?;
        Ok(self.capacity[u * self.n + v])
    }

    /// Return the current flow on the directed edge `u -> v`.
    ///
    /// The value is negative if flow is sent from `v` to `u`.
    pub fn flow(&self, u: usize, v: usize) -> Result<F> {
        self.check_node(u)?;
        self.check_node(v)?;
        Ok(self.flow[u * self.n + v])
    }

    /// Return the residual capacity `capacity(u, v) - flow(u, v)`.
    pub fn residual(&self, u: usize, v: usize) -> Result<F> {
        self.check_node(u)?;
        self.check_node(v)?;
        Ok(self.res(u, v))
    }

    /// Return the neighbors of `u`, regardless of edge direction.
    pub fn neighs(&self, u: usize) -> Result<&[usize]> {
        self.check_node(u)?;
        Ok(&self.neighs[u])
    }

    /// Set the flow on all edges to zero.
    pub fn reset_flow(&mut self) {
        for f in self.flow.iter_mut() {
            *f = F::zero();
        }
    }

    /// Fail if `u` is not a node of this network.
    pub(crate) fn check_node(&self, u: usize) -> Result<()> {
        if u < self.n {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: u,
                num_nodes: self.n,
            })
        }
    }

    /// Residual capacity without range checks.
    pub(crate) fn res(&self, u: usize, v: usize) -> F {
        let i = u * self.n + v;
        self.capacity[i] - self.flow[i]
    }

    /// The adjacency list of `u` without range checks.
    pub(crate) fn adj(&self, u: usize) -> &[usize] {
        &self.neighs[u]
    }

    /// Send `df` units of flow from `u` to `v`.
    pub(crate) fn push(&mut self, u: usize, v: usize, df: F) {
        self.flow[u * self.n + v] += df;
        self.flow[v * self.n + u] -= df;
    }
}
