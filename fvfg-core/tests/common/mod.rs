//! Test support: reference state views and a bit-by-bit reference curve

#![allow(dead_code)]

use std::path::PathBuf;

use fvfg_core::StateTables;

// Orientations of the one-bit automaton. They form a Klein four-group, so
// composing two of them is XOR on these ids.
const IDENTITY: u8 = 0;
const SWAP: u8 = 1;
const ANTI_SWAP: u8 = 2;

fn orient(state: u8, bx: u32, by: u32) -> (u32, u32) {
    match state {
        0 => (bx, by),
        1 => (by, bx),
        2 => (1 - by, 1 - bx),
        _ => (1 - bx, 1 - by),
    }
}

/// One curve level: `(2-bit digit, next state)`
fn bit_step(state: u8, bx: u32, by: u32) -> (u32, u8) {
    let (tx, ty) = orient(state, bx, by);
    let digit = (3 * tx) ^ ty;
    let turn = match (tx, ty) {
        (1, 0) => ANTI_SWAP,
        (_, 0) => SWAP,
        _ => IDENTITY,
    };
    (digit, turn ^ state)
}

/// Build the four views for `group_size` by running the one-bit automaton.
pub fn build_tables(group_size: u32) -> StateTables {
    let dim = 1usize << group_size;
    let len = StateTables::required_len(group_size);
    let mut chm = vec![0u32; len];
    let mut csm = vec![0u8; len];
    let mut hcm = vec![0u32; len];
    let mut hsm = vec![0u8; len];

    for start in 0..4u8 {
        for gx in 0..dim as u32 {
            for gy in 0..dim as u32 {
                let mut state = start;
                let mut key = 0u32;
                for bit in (0..group_size).rev() {
                    let (digit, next) = bit_step(state, (gx >> bit) & 1, (gy >> bit) & 1);
                    key = (key << 2) | digit;
                    state = next;
                }
                let base = start as usize * dim * dim;
                let pos = base + dim * gx as usize + gy as usize;
                chm[pos] = key;
                csm[pos] = state;
                hcm[base + key as usize] = (gx << group_size) | gy;
                hsm[base + key as usize] = state;
            }
        }
    }

    StateTables::new(group_size, chm, csm, hcm, hsm).expect("reference views are well formed")
}

/// Textbook xy2d over a `2^order` grid
pub fn reference_index(x: u32, y: u32, order: u32) -> u64 {
    let (mut x, mut y) = (x as u64, y as u64);
    let mut d = 0u64;
    let mut s = 1u64 << (order - 1);
    while s > 0 {
        let rx = u64::from(x & s > 0);
        let ry = u64::from(y & s > 0);
        d = d.wrapping_add(s.wrapping_mul(s).wrapping_mul((3 * rx) ^ ry));
        if ry == 0 {
            if rx == 1 {
                x = (s - 1).wrapping_sub(x) & (s - 1);
                y = (s - 1).wrapping_sub(y) & (s - 1);
            }
            std::mem::swap(&mut x, &mut y);
        }
        x &= s - 1;
        y &= s - 1;
        s >>= 1;
    }
    d
}

/// Directory with the checked-in g = 4 state views
pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}
