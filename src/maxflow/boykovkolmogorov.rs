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

//! This module implements the max flow algorithm of Boykov and Kolmogorov.
//!
//! The algorithm maintains two search trees, one rooted at the source and
//! one rooted at the sink. The trees are grown from a queue of active
//! nodes until they touch, flow is augmented along the path through the
//! touching edge, and nodes whose tree edge became saturated are either
//! re-attached to their tree or released. The trees are kept between
//! augmentations instead of being rebuilt from scratch.
//!
//! # Example
//!
//! ```
//! use bk_flow::maxflow::BoykovKolmogorov;
//!
//! let (s, a, b, c, d, t) = (0, 1, 2, 3, 4, 5);
//! let mut bk = BoykovKolmogorov::<i32>::new(6);
//! bk.add_edge(s, a, 5).unwrap();
//! bk.add_edge(s, c, 5).unwrap();
//! bk.add_edge(a, b, 2).unwrap();
//! bk.add_edge(a, c, 1).unwrap();
//! bk.add_edge(c, d, 2).unwrap();
//! bk.add_edge(d, b, 2).unwrap();
//! bk.add_edge(b, t, 4).unwrap();
//! bk.add_edge(d, t, 5).unwrap();
//!
//! assert_eq!(bk.value(), None);
//! assert_eq!(bk.solve(s, t), Ok(4));
//! assert_eq!(bk.value(), Some(4));
//!
//! // the source side of a minimum cut
//! let mincut = bk.mincut();
//! assert_eq!(mincut, vec![s, a, c]);
//!
//! let mut cutval = 0;
//! for &u in &mincut {
//!     for v in (0..6).filter(|v| !mincut.contains(v)) {
//!         cutval += bk.capacity(u, v).unwrap();
//!     }
//! }
//! assert_eq!(cutval, 4);
//! ```

use crate::error::{Error, Result};
use crate::network::Network;
use crate::num::traits::{NumAssign, Signed};

use log::{debug, trace};

use std::cmp::min;
use std::collections::VecDeque;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The search tree a node belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Tree {
    /// The node is in neither tree.
    Free,
    /// The node is in the tree rooted at the source.
    Source,
    /// The node is in the tree rooted at the sink.
    Sink,
}

impl Tree {
    /// Return the opposite tree, `Free` stays `Free`.
    pub fn other(self) -> Tree {
        match self {
            Tree::Free => Tree::Free,
            Tree::Source => Tree::Sink,
            Tree::Sink => Tree::Source,
        }
    }
}

/// Residual capacity of the tree edge between parent `u` and child `v`.
///
/// In the source tree flow travels from parent to child, in the sink tree
/// from child to parent.
fn tree_res<F>(net: &Network<F>, t: Tree, u: usize, v: usize) -> F
where
    F: NumAssign + Signed + Ord + Copy,
{
    match t {
        Tree::Source => net.res(u, v),
        Tree::Sink => net.res(v, u),
        Tree::Free => F::zero(),
    }
}

/// Tree labels, parent links and the two work queues.
struct TreeState {
    /// The tree of each node.
    tree: Vec<Tree>,
    /// The parent of each node in its tree.
    ///
    /// This is `None` for free nodes, for the two roots and for orphans.
    parent: Vec<Option<usize>>,
    /// The nodes from which the trees may be grown.
    active: VecDeque<usize>,
    /// Nodes whose edge to their parent has been saturated.
    orphans: VecDeque<usize>,
}

impl TreeState {
    fn new(n: usize) -> Self {
        TreeState {
            tree: vec![Tree::Free; n],
            parent: vec![None; n],
            active: VecDeque::with_capacity(n),
            orphans: VecDeque::new(),
        }
    }

    /// Release all nodes.
    fn clear(&mut self) {
        self.tree.fill(Tree::Free);
        self.parent.fill(None);
        self.active.clear();
        self.orphans.clear();
    }

    /// Start new trees at `src` and `snk`, all other nodes are free.
    fn init(&mut self, src: usize, snk: usize) {
        self.clear();
        self.tree[src] = Tree::Source;
        self.tree[snk] = Tree::Sink;
        self.active.push_back(src);
        self.active.push_back(snk);
    }

    /// Cut `u` from its parent and schedule it for adoption.
    fn make_orphan(&mut self, u: usize) {
        self.parent[u] = None;
        self.orphans.push_back(u);
    }

    /// Return `true` if the parent chain of `u` ends in one of the roots.
    ///
    /// The chain of a node below an unprocessed orphan ends at that orphan.
    /// This walks the whole chain, so each call costs O(depth).
    // TODO: keep a per-node timestamp and distance to the root so that
    // repeated checks during one adoption phase are O(1).
    fn is_rooted(&self, mut u: usize, src: usize, snk: usize) -> bool {
        loop {
            if u == src || u == snk {
                return true;
            }
            match self.parent[u] {
                Some(p) => u = p,
                None => return false,
            }
        }
    }
}

/// The max-flow algorithm of Boykov and Kolmogorov.
///
/// The solver owns the network it works on. The flow computed by
/// [`solve`](Self::solve) stays in the network until
/// [`reset_flow`](Self::reset_flow) is called, so a second call to
/// `solve` only adds flow on the remaining residual network.
pub struct BoykovKolmogorov<F> {
    /// The network including the current flow.
    net: Network<F>,
    state: TreeState,
    /// Source and sink of the latest solve.
    terminals: Option<(usize, usize)>,
    /// The value of the latest computed maximum flow.
    value: Option<F>,
    /// The number of augmentations during the latest solve.
    pub cnt_augment: usize,
    /// The number of processed orphans during the latest solve.
    pub cnt_orphan: usize,
}

impl<F> From<Network<F>> for BoykovKolmogorov<F>
where
    F: NumAssign + Signed + Ord + Copy,
{
    fn from(net: Network<F>) -> Self {
        let n = net.num_nodes();
        BoykovKolmogorov {
            net,
            state: TreeState::new(n),
            terminals: None,
            value: None,
            cnt_augment: 0,
            cnt_orphan: 0,
        }
    }
}

impl<F> BoykovKolmogorov<F>
where
    F: NumAssign + Signed + Ord + Copy + fmt::Display,
{
    /// Create a solver on an empty network with `n` nodes.
    pub fn new(n: usize) -> Self {
        Network::new(n).into()
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &Network<F> {
        &self.net
    }

    /// Return the underlying network with the current flow.
    pub fn into_network(self) -> Network<F> {
        self.net
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.net.num_nodes()
    }

    /// Set the capacity of the directed edge `u -> v`.
    ///
    /// See [`Network::add_edge`].
    pub fn add_edge(&mut self, u: usize, v: usize, cap: F) -> Result<()> {
        self.net.add_edge(u, v, cap)
    }

    /// Return the capacity of the directed edge `u -> v`.
    pub fn capacity(&self, u: usize, v: usize) -> Result<F> {
        self.net.capacity(u, v)
    }

    /// Return the residual capacity of the directed edge `u -> v`.
    pub fn residual(&self, u: usize, v: usize) -> Result<F> {
        self.net.residual(u, v)
    }

    /// Return the flow on the directed edge `u -> v`.
    pub fn flow(&self, u: usize, v: usize) -> Result<F> {
        self.net.flow(u, v)
    }

    /// Return the value of the latest computed maximum flow.
    ///
    /// This is the value returned by the latest [`solve`](Self::solve). It
    /// is `None` if no flow has been computed since construction or
    /// the latest call to [`reset_flow`](Self::reset_flow).
    pub fn value(&self) -> Option<F> {
        self.value
    }

    /// Return the tree `u` belonged to at the end of the latest solve.
    pub fn tree(&self, u: usize) -> Result<Tree> {
        self.net.check_node(u)?;
        Ok(self.state.tree[u])
    }

    /// Remove all flow and forget the latest result.
    pub fn reset_flow(&mut self) {
        self.net.reset_flow();
        self.state.clear();
        self.terminals = None;
        self.value = None;
    }

    /// Solve the maxflow problem from `src` to `snk`.
    ///
    /// Flow already present in the network is kept and only extended. If
    /// the latest solve used the same source and sink, the returned value
    /// is the total flow including that earlier result. Otherwise (first
    /// solve, after [`reset_flow`](Self::reset_flow) or with other
    /// terminals) counting starts at zero, so only the flow sent by this
    /// call is returned.
    pub fn solve(&mut self, src: usize, snk: usize) -> Result<F> {
        self.net.check_node(src)?;
        self.net.check_node(snk)?;
        if src == snk {
            return Err(Error::InvalidArgument {
                msg: format!("source and sink must not be equal (node {})", src),
            });
        }

        debug!("Start Boykov-Kolmogorov max flow from {} to {}", src, snk);

        self.state.init(src, snk);
        self.cnt_augment = 0;
        self.cnt_orphan = 0;

        let mut value = match (self.terminals, self.value) {
            (Some(terminals), Some(value)) if terminals == (src, snk) => value,
            _ => F::zero(),
        };
        self.terminals = Some((src, snk));

        while let Some((p, q)) = self.grow() {
            value += self.augment(src, snk, p, q);
            self.adopt(src, snk);
        }
        self.value = Some(value);

        debug!(
            "Max flow from {} to {} done (value: {}, augmentations: {}, orphans: {})",
            src,
            snk,
            value,
            self.cnt_augment,
            self.cnt_orphan
        );

        Ok(value)
    }

    /// Return the minimal cut associated with the latest maximum flow.
    ///
    /// These are the nodes reachable from the source along edges with
    /// positive residual capacity, in increasing order. The list is empty
    /// if no flow has been computed.
    pub fn mincut(&self) -> Vec<usize> {
        let src = match self.terminals {
            Some((src, _)) => src,
            None => return vec![],
        };

        let n = self.net.num_nodes();
        let mut seen = vec![false; n];
        let mut queue = VecDeque::with_capacity(n);
        seen[src] = true;
        queue.push_back(src);
        while let Some(u) = queue.pop_front() {
            for &v in self.net.adj(u) {
                if !seen[v] && self.net.res(u, v) > F::zero() {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }

        (0..n).filter(|&u| seen[u]).collect()
    }

    /// Grow both trees from the active nodes.
    ///
    /// Returns an edge `(p, q)` with positive residual capacity from the
    /// source tree node `p` to the sink tree node `q`, or `None` if the
    /// active nodes are exhausted and the trees do not touch.
    fn grow(&mut self) -> Option<(usize, usize)> {
        while let Some(p) = self.state.active.pop_front() {
            let t = self.state.tree[p];
            if t == Tree::Free {
                // released after it has been activated
                continue;
            }

            for &q in self.net.adj(p) {
                if tree_res(&self.net, t, p, q) <= F::zero() {
                    continue;
                }
                match self.state.tree[q] {
                    Tree::Free => {
                        self.state.tree[q] = t;
                        self.state.parent[q] = Some(p);
                        self.state.active.push_back(q);
                    }
                    s if s == t => {}
                    _ => {
                        // p may still have free neighbors
                        self.state.active.push_front(p);
                        return Some(if t == Tree::Source { (p, q) } else { (q, p) });
                    }
                }
            }
        }
        None
    }

    /// Augment along the path through the edge `(p, q)`.
    ///
    /// Returns the amount of flow sent. Nodes whose tree edge becomes
    /// saturated are turned into orphans.
    fn augment(&mut self, src: usize, snk: usize, p: usize, q: usize) -> F {
        debug_assert_eq!(self.state.tree[p], Tree::Source);
        debug_assert_eq!(self.state.tree[q], Tree::Sink);

        // compute the bottleneck
        let mut df = self.net.res(p, q);
        let mut v = p;
        while let Some(u) = self.state.parent[v] {
            df = min(df, self.net.res(u, v));
            v = u;
        }
        debug_assert_eq!(v, src);
        let mut v = q;
        while let Some(u) = self.state.parent[v] {
            df = min(df, self.net.res(v, u));
            v = u;
        }
        debug_assert_eq!(v, snk);
        debug_assert!(df > F::zero());

        // now augment the flow
        self.net.push(p, q, df);
        let mut v = p;
        while let Some(u) = self.state.parent[v] {
            self.net.push(u, v, df);
            if self.net.res(u, v).is_zero() {
                self.state.make_orphan(v);
            }
            v = u;
        }
        let mut v = q;
        while let Some(u) = self.state.parent[v] {
            self.net.push(v, u, df);
            if self.net.res(v, u).is_zero() {
                self.state.make_orphan(v);
            }
            v = u;
        }

        trace!("Augmented {} along ({}, {})", df, p, q);
        self.cnt_augment += 1;
        df
    }

    /// Process all orphans until the worklist is empty.
    ///
    /// An orphan is attached to a neighbor in its tree that is connected
    /// to the root with an unsaturated edge towards the orphan. Otherwise
    /// it is freed, its children become orphans and its neighbors in the
    /// opposite tree are activated.
    fn adopt(&mut self, src: usize, snk: usize) {
        while let Some(o) = self.state.orphans.pop_front() {
            let t = self.state.tree[o];
            if t == Tree::Free {
                continue;
            }
            self.cnt_orphan += 1;
            self.state.parent[o] = None;

            let net = &self.net;
            let state = &self.state;
            let newparent = net
                .adj(o)
                .iter()
                .copied()
                .find(|&u| state.tree[u] == t && tree_res(net, t, u, o) > F::zero() && state.is_rooted(u, src, snk));

            if let Some(u) = newparent {
                self.state.parent[o] = Some(u);
                continue;
            }

            trace!("Release orphan {}", o);
            self.state.tree[o] = Tree::Free;
            for &u in self.net.adj(o) {
                let s = self.state.tree[u];
                if s == t {
                    if self.state.parent[u] == Some(o) {
                        self.state.make_orphan(u);
                    }
                } else if s == t.other() {
                    self.state.active.push_back(u);
                }
            }
        }
    }
}

/// Solve the maxflow problem using the algorithm of Boykov and Kolmogorov.
///
/// The function solves the max flow problem from the source node `src`
/// to the sink node `snk` on a copy of `net`. The given network is not
/// modified.
///
/// The function returns the flow value, the network carrying the flow and
/// the nodes of a minimal cut.
pub fn boykov_kolmogorov<F>(net: &Network<F>, src: usize, snk: usize) -> Result<(F, Network<F>, Vec<usize>)>
where
    F: NumAssign + Signed + Ord + Copy + fmt::Display,
{
    let mut maxflow = BoykovKolmogorov::from(net.clone());
    let value = maxflow.solve(src, snk)?;
    let mincut = maxflow.mincut();
    Ok((value, maxflow.into_network(), mincut))
}
