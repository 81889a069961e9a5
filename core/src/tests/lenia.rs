use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::prelude::*;

fn small_lenia() -> Lenia {
    Lenia::new(LeniaParams {
        radius: 4,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_lenia_empty_stays_empty() {
    let mut automaton = Automaton::new(small_lenia(), (12, 12));
    automaton.steps(3);
    assert_eq!(0, automaton.population());
    assert_eq!(0.0, automaton.mass());
}

#[test]
fn test_lenia_uniform_grid() {
    // With a normalized kernel, a uniform grid convolves to itself, so every
    // cell receives the same growth.
    let rule = small_lenia();
    let params = *rule.params();
    let mut automaton = Automaton::new(rule, (10, 10));
    let positions: Vec<_> = automaton.positions().collect();
    for &(x, y) in &positions {
        automaton.set(x as isize, y as isize, params.mu);
    }
    automaton.step();
    for &(x, y) in &positions {
        let cell = automaton.get(x as isize, y as isize);
        assert!((cell - (params.mu + params.dt)).abs() < 1e-9, "{}", cell);
    }

    // A saturated grid is far from mu and decays by dt.
    for &(x, y) in &positions {
        automaton.paint(x as isize, y as isize);
    }
    automaton.step();
    for &(x, y) in &positions {
        let cell = automaton.get(x as isize, y as isize);
        assert!((cell - (1.0 - params.dt)).abs() < 1e-6, "{}", cell);
    }
}

#[test]
fn test_lenia_stays_in_range() {
    let mut automaton = Automaton::new(small_lenia(), (24, 24));
    automaton.randomize_with(&mut StdRng::seed_from_u64(5));
    for _ in 0..5 {
        automaton.step();
        assert!(automaton.grid().iter().all(|&c| (0.0..=1.0).contains(&c)));
    }
    assert_eq!(5, automaton.generation());
}

#[test]
fn test_lenia_step_matches_formula() {
    let mut automaton = Automaton::new(small_lenia(), (9, 11));
    automaton.randomize_with(&mut StdRng::seed_from_u64(77));
    let before = automaton.clone();
    let conv = before.convolve();
    automaton.step();
    let rule = before.rules();
    for ((x, y), &u) in conv.iter_enumerated() {
        let old = before.grid()[(x, y)];
        let expected = (old + rule.growth_mapping(u)).max(0.0).min(1.0);
        assert_eq!(expected, automaton.grid()[(x, y)]);
    }
}

#[test]
fn test_lenia_deterministic() {
    let mut a = Automaton::new(small_lenia(), (16, 16));
    a.randomize_with(&mut StdRng::seed_from_u64(3));
    let mut b = a.clone();
    a.steps(4);
    b.steps(4);
    assert_eq!(a.grid(), b.grid());
}
