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

use bk_flow::{boykov_kolmogorov, BoykovKolmogorov, Error, Network};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use std::error;

/// Check antisymmetry, capacity bounds and flow conservation.
fn check_flow(bk: &BoykovKolmogorov<i64>, src: usize, snk: usize) {
    let n = bk.num_nodes();
    for u in 0..n {
        for v in 0..n {
            let f = bk.flow(u, v).unwrap();
            assert_eq!(f, -bk.flow(v, u).unwrap(), "antisymmetry on ({}, {})", u, v);
            if f >= 0 {
                assert!(f <= bk.capacity(u, v).unwrap(), "capacity on ({}, {})", u, v);
            } else {
                assert!(-f <= bk.capacity(v, u).unwrap(), "capacity on ({}, {})", v, u);
            }
            assert!(bk.residual(u, v).unwrap() >= 0);
        }
        if u != src && u != snk {
            let out: i64 = (0..n).map(|v| bk.flow(u, v).unwrap().max(0)).sum();
            let inn: i64 = (0..n).map(|v| bk.flow(v, u).unwrap().max(0)).sum();
            assert_eq!(out, inn, "conservation at {}", u);
        }
    }
}

/// The capacity of the cut between `side` and the remaining nodes.
fn cut_value(bk: &BoykovKolmogorov<i64>, side: &[bool]) -> i64 {
    let n = bk.num_nodes();
    let mut value = 0;
    for u in (0..n).filter(|&u| side[u]) {
        for v in (0..n).filter(|&v| !side[v]) {
            value += bk.capacity(u, v).unwrap();
        }
    }
    value
}

/// Minimum cut value by enumerating all node subsets.
fn brute_force_mincut(bk: &BoykovKolmogorov<i64>, src: usize, snk: usize) -> i64 {
    let n = bk.num_nodes();
    let mut best = i64::MAX;
    for mask in 0u32..(1 << n) {
        if mask & (1 << src) == 0 || mask & (1 << snk) != 0 {
            continue;
        }
        let side: Vec<bool> = (0..n).map(|u| mask & (1 << u) != 0).collect();
        best = best.min(cut_value(bk, &side));
    }
    best
}

fn random_network(rng: &mut Pcg64, n: usize, density: f64, maxcap: i64) -> BoykovKolmogorov<i64> {
    let mut bk = BoykovKolmogorov::new(n);
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.gen_bool(density) {
                bk.add_edge(u, v, rng.gen_range(0..=maxcap)).unwrap();
            }
        }
    }
    bk
}

#[test]
fn test_path() {
    let mut bk = BoykovKolmogorov::new(3);
    bk.add_edge(0, 1, 5).unwrap();
    bk.add_edge(1, 2, 3).unwrap();
    assert_eq!(bk.solve(0, 2), Ok(3));
    check_flow(&bk, 0, 2);
}

#[test]
fn test_diamond() {
    let mut bk = BoykovKolmogorov::new(4);
    bk.add_edge(0, 1, 10).unwrap();
    bk.add_edge(0, 2, 10).unwrap();
    bk.add_edge(1, 3, 4).unwrap();
    bk.add_edge(2, 3, 9).unwrap();
    assert_eq!(bk.solve(0, 3), Ok(13));
    check_flow(&bk, 0, 3);
}

#[test]
fn test_disconnected() {
    let mut bk = BoykovKolmogorov::<i64>::new(2);
    assert_eq!(bk.solve(0, 1), Ok(0));
    assert_eq!(bk.value(), Some(0));
}

#[test]
fn test_reset() {
    let mut bk = BoykovKolmogorov::new(2);
    bk.add_edge(0, 1, 7).unwrap();
    assert_eq!(bk.solve(0, 1), Ok(7));
    assert_eq!(bk.solve(0, 1), Ok(7));
    bk.reset_flow();
    assert_eq!(bk.value(), None);
    assert_eq!(bk.solve(0, 1), Ok(7));
}

#[test]
fn test_source_is_sink() {
    let mut bk = BoykovKolmogorov::<i64>::new(2);
    bk.add_edge(0, 1, 7).unwrap();
    match bk.solve(1, 1) {
        Err(Error::InvalidArgument { .. }) => {}
        res => panic!("unexpected result: {:?}", res),
    }
    assert_eq!(bk.value(), None);
}

#[test]
fn test_overwrite_capacity() {
    let mut bk = BoykovKolmogorov::new(2);
    bk.add_edge(0, 1, 7).unwrap();
    bk.add_edge(0, 1, 2).unwrap();
    assert_eq!(bk.capacity(0, 1), Ok(2));
    assert_eq!(bk.solve(0, 1), Ok(2));
}

#[test]
fn test_independent_instances() {
    let mut net = Network::new(3);
    net.add_edge(0, 1, 4).unwrap();
    net.add_edge(1, 2, 4).unwrap();

    let mut a = BoykovKolmogorov::from(net.clone());
    let b = BoykovKolmogorov::from(net);
    assert_eq!(a.solve(0, 2), Ok(4));
    assert_eq!(a.flow(1, 2), Ok(4));
    assert_eq!(b.flow(1, 2), Ok(0));
    assert_eq!(b.value(), None);
}

#[test]
fn test_random_small() {
    let mut rng = Pcg64::seed_from_u64(42);
    for _ in 0..300 {
        let n = rng.gen_range(2..=8);
        let mut bk = random_network(&mut rng, n, 0.4, 9);
        let src = rng.gen_range(0..n);
        let snk = (src + rng.gen_range(1..n)) % n;

        let value = bk.solve(src, snk).unwrap();
        assert_eq!(value, brute_force_mincut(&bk, src, snk));
        check_flow(&bk, src, snk);

        // max-flow/min-cut duality
        let mincut = bk.mincut();
        assert!(mincut.contains(&src));
        assert!(!mincut.contains(&snk));
        let side: Vec<bool> = (0..n).map(|u| mincut.contains(&u)).collect();
        assert_eq!(cut_value(&bk, &side), value);

        // nothing left to augment, the total is unchanged
        assert_eq!(bk.solve(src, snk), Ok(value));
        assert_eq!(bk.cnt_augment, 0);
        assert_eq!(bk.value(), Some(value));

        bk.reset_flow();
        assert_eq!(bk.solve(src, snk), Ok(value));
    }
}

#[test]
fn test_random_large() -> Result<(), Box<dyn error::Error>> {
    let mut rng = Pcg64::seed_from_u64(4711);
    for &(n, density) in &[(30, 0.2), (60, 0.1), (100, 0.05)] {
        let mut bk = random_network(&mut rng, n, density, 100);
        let value = bk.solve(0, n - 1)?;
        check_flow(&bk, 0, n - 1);

        let mincut = bk.mincut();
        let side: Vec<bool> = (0..n).map(|u| mincut.contains(&u)).collect();
        assert_eq!(cut_value(&bk, &side), value);

        // solving from scratch on a copy gives the same value
        let mut net = bk.as_network().clone();
        net.reset_flow();
        let (value2, flow, mincut2) = boykov_kolmogorov(&net, 0, n - 1)?;
        assert_eq!(value2, value);
        assert_eq!(mincut2, mincut);
        assert_eq!(net.flow(0, 1)?, 0);
        assert_eq!(
            (0..n).map(|v| flow.flow(0, v)).sum::<Result<i64, Error>>()?,
            value
        );
    }
    Ok(())
}

#[cfg(feature = "serialize")]
#[test]
fn test_serialize() -> Result<(), Box<dyn error::Error>> {
    let mut net = Network::<i64>::new(3);
    net.add_edge(0, 1, 5)?;
    net.add_edge(1, 2, 3)?;

    let json = serde_json::to_string(&net)?;
    let net: Network<i64> = serde_json::from_str(&json)?;

    let mut bk = BoykovKolmogorov::from(net);
    assert_eq!(bk.solve(0, 2)?, 3);
    Ok(())
}
