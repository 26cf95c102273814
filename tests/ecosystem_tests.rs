#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use bacteria::simulation::bacteria::Bacteria;
use bacteria::simulation::ecosystem::Ecosystem;
use bacteria::simulation::error::Error;
use bacteria::simulation::brain::NeuralNetwork;
use bacteria::simulation::food::Food;
use bacteria::simulation::matrix::Matrix;
use bacteria::simulation::params::Params;
use bacteria::simulation::rng::create_rng;
use rand_chacha::ChaCha12Rng;

fn create_test_params() -> Params {
    Params {
        box_width: 500.0,
        box_height: 400.0,
        n_bacteria: 30,
        n_food: 40,
        min_food: 0,
        reproduction_chance: 0.0,
        ..Params::default()
    }
}

fn bacterium(
    id: usize,
    x: f32,
    y: f32,
    size: f32,
    energy: f32,
    params: &Params,
    rng: &mut ChaCha12Rng,
) -> Bacteria {
    let mut b = Bacteria::new(id, x, y, None, params, rng).unwrap();
    b.size = size;
    b.energy = energy;
    b
}

/// A bacterium whose blank brain always turns left, which costs no energy.
fn idle_bacterium(
    id: usize,
    x: f32,
    size: f32,
    energy: f32,
    params: &Params,
    rng: &mut ChaCha12Rng,
) -> Bacteria {
    let brain = NeuralNetwork::from_weights(Matrix::new(8, 3), Matrix::new(4, 8)).unwrap();
    let mut b = Bacteria::new(id, x, 100.0, Some(brain), params, rng).unwrap();
    b.size = size;
    b.energy = energy;
    b
}

#[test]
fn test_ecosystem_creation() {
    let params = create_test_params();
    let ecosystem = Ecosystem::new(&params, &mut create_rng(1)).unwrap();

    assert_eq!(ecosystem.bacteria.len(), params.n_bacteria);
    assert_eq!(ecosystem.food.len(), params.n_food);
    assert_eq!(ecosystem.tick, 0);

    for b in &ecosystem.bacteria {
        assert_eq!(b.generation, 1);
        assert_eq!(b.energy, params.initial_energy);
        assert_eq!(b.size, params.initial_size);
        assert!(b.pos[0] >= 0.0 && b.pos[0] < params.box_width);
        assert!(b.pos[1] >= 0.0 && b.pos[1] < params.box_height);
    }
    for item in &ecosystem.food {
        assert!(item.energy >= 10.0 && item.energy < 50.0);
        assert_eq!(item.energy.fract(), 0.0);
        assert!(item.pos[0] >= 0.0 && item.pos[0] < params.box_width);
        assert!(item.pos[1] >= 0.0 && item.pos[1] < params.box_height);
    }
}

#[test]
fn test_creation_rejects_invalid_params() {
    let params = Params {
        box_width: 0.0,
        ..create_test_params()
    };

    let result = Ecosystem::new(&params, &mut create_rng(1));

    assert!(matches!(result, Err(Error::InvalidParams(_))));
}

#[test]
fn test_simulation_step_advances_tick() {
    let params = create_test_params();
    let mut rng = create_rng(2);
    let mut ecosystem = Ecosystem::new(&params, &mut rng).unwrap();

    ecosystem.step(&params, &mut rng).unwrap();
    ecosystem.step(&params, &mut rng).unwrap();

    assert_eq!(ecosystem.tick, 2);
    assert_eq!(ecosystem.stats().tick, 2);
}

#[test]
fn test_same_seed_gives_same_run() {
    let params = Params {
        reproduction_chance: 0.01,
        min_food: 10,
        ..create_test_params()
    };

    let run = |seed| {
        let mut rng = create_rng(seed);
        let mut ecosystem = Ecosystem::new(&params, &mut rng).unwrap();
        for _ in 0..50 {
            ecosystem.step(&params, &mut rng).unwrap();
        }
        ecosystem
    };

    assert_eq!(run(5), run(5));
}

#[test]
fn test_energy_never_increases_without_food_or_prey() {
    let params = Params {
        n_bacteria: 1,
        n_food: 0,
        ..create_test_params()
    };
    let mut rng = create_rng(3);
    let mut ecosystem = Ecosystem::new(&params, &mut rng).unwrap();

    let mut last = ecosystem.bacteria[0].energy;
    for _ in 0..100 {
        ecosystem.step(&params, &mut rng).unwrap();
        let energy = ecosystem.bacteria[0].energy;
        assert!(energy <= last);
        last = energy;
    }
}

#[test]
fn test_dead_bacteria_are_removed() {
    let params = create_test_params();
    let mut rng = create_rng(4);
    let mut ecosystem = Ecosystem::new(&params, &mut rng).unwrap();

    for b in &mut ecosystem.bacteria {
        b.energy = 0.0;
    }
    ecosystem.food.clear();

    ecosystem.step(&params, &mut rng).unwrap();

    assert!(ecosystem.is_extinct());
    assert_eq!(ecosystem.stats().population, 0);
}

#[test]
fn test_step_resolves_predation() {
    let params = create_test_params();
    let mut rng = create_rng(5);
    let predator = bacterium(0, 100.0, 100.0, 10.0, 5.0, &params, &mut rng);
    let prey = bacterium(1, 101.0, 100.0, 5.0, 20.0, &params, &mut rng);
    let mut ecosystem = Ecosystem::from_parts(vec![predator, prey], Vec::new());

    ecosystem.step(&params, &mut rng).unwrap();

    assert_eq!(ecosystem.bacteria.len(), 1);
    let survivor = &ecosystem.bacteria[0];
    assert_eq!(survivor.id, 0);
    assert!(survivor.energy >= 14.5 && survivor.energy <= 15.0);
}

#[test]
fn test_step_removes_eaten_food() {
    let params = create_test_params();
    let mut rng = create_rng(6);
    let b = bacterium(0, 50.0, 50.0, 10.0, 10.0, &params, &mut rng);
    let food = vec![
        Food::new(0, 51.0, 50.0, 30.0),
        Food::new(1, 300.0, 300.0, 30.0),
    ];
    let mut ecosystem = Ecosystem::from_parts(vec![b], food);

    ecosystem.step(&params, &mut rng).unwrap();

    assert_eq!(ecosystem.food.len(), 1);
    assert_eq!(ecosystem.food[0].id, 1);
    assert!(ecosystem.bacteria[0].energy >= 39.5);
}

#[test]
fn test_food_is_respawned_below_minimum() {
    let params = Params {
        min_food: 10,
        ..create_test_params()
    };
    let mut rng = create_rng(7);
    let food = vec![Food::new(4, 1.0, 1.0, 10.0)];
    let mut ecosystem = Ecosystem::from_parts(Vec::new(), food);

    ecosystem.step(&params, &mut rng).unwrap();
    assert_eq!(ecosystem.food.len(), 2);
    assert_eq!(ecosystem.food[1].id, 5);

    for _ in 0..20 {
        ecosystem.step(&params, &mut rng).unwrap();
    }
    assert_eq!(ecosystem.food.len(), 10);
}

#[test]
fn test_offspring_join_after_the_tick() {
    let params = Params {
        reproduction_chance: 1.0,
        ..create_test_params()
    };
    let mut rng = create_rng(8);
    let parent = bacterium(0, 200.0, 200.0, 10.0, 50.0, &params, &mut rng);
    let mut ecosystem = Ecosystem::from_parts(vec![parent], Vec::new());

    ecosystem.step(&params, &mut rng).unwrap();

    assert_eq!(ecosystem.bacteria.len(), 2);
    let child = &ecosystem.bacteria[1];
    assert_eq!(child.id, 1);
    assert_eq!(child.generation, 2);
    // the child has not acted yet
    assert_eq!(child.energy, params.initial_energy);
    assert_eq!(child.size, params.initial_size);

    let stats = ecosystem.stats();
    assert_eq!(stats.min_generation, Some(1));
    assert_eq!(stats.max_generation, Some(2));
}

#[test]
fn test_wrap_around() {
    let params = Params {
        wrap_around: true,
        ..create_test_params()
    };
    let mut rng = create_rng(9);
    let b = bacterium(0, params.box_width + 50.0, -30.0, 10.0, 50.0, &params, &mut rng);
    let mut ecosystem = Ecosystem::from_parts(vec![b], Vec::new());

    ecosystem.step(&params, &mut rng).unwrap();

    let pos = &ecosystem.bacteria[0].pos;
    assert!(pos[0] >= 0.0 && pos[0] < params.box_width);
    assert!(pos[1] >= 0.0 && pos[1] < params.box_height);
}

#[test]
fn test_stats() {
    let params = create_test_params();
    let mut rng = create_rng(10);
    let mut young = bacterium(0, 0.0, 0.0, 10.0, 30.0, &params, &mut rng);
    young.generation = 3;
    let old = bacterium(1, 100.0, 0.0, 10.0, 10.0, &params, &mut rng);
    let ecosystem = Ecosystem::from_parts(vec![young, old], vec![Food::new(0, 5.0, 5.0, 1.0)]);

    let stats = ecosystem.stats();

    assert_eq!(stats.population, 2);
    assert_eq!(stats.food, 1);
    assert_eq!(stats.min_generation, Some(1));
    assert_eq!(stats.max_generation, Some(3));
    assert_eq!(stats.mean_energy, 20.0);

    let empty = Ecosystem::from_parts(Vec::new(), Vec::new()).stats();
    assert_eq!(empty.mean_energy, 0.0);
    assert_eq!(empty.min_generation, None);
}

#[test]
fn test_loser_does_not_reproduce() {
    let params = Params {
        reproduction_chance: 1.0,
        ..create_test_params()
    };
    let mut rng = create_rng(11);
    let mut small = idle_bacterium(0, 100.0, 5.0, 20.0, &params, &mut rng);
    small.generation = 5;
    let large = idle_bacterium(1, 101.0, 10.0, 30.0, &params, &mut rng);
    let mut ecosystem = Ecosystem::from_parts(vec![small, large], Vec::new());

    ecosystem.step(&params, &mut rng).unwrap();

    assert!(ecosystem.bacteria.iter().all(|b| b.generation != 6));
    assert_eq!(ecosystem.bacteria.len(), 2);
    assert_eq!(ecosystem.bacteria[0].id, 1);
    assert_eq!(ecosystem.bacteria[0].energy, 40.0);
    assert_eq!(ecosystem.bacteria[1].id, 2);
    assert_eq!(ecosystem.bacteria[1].generation, 2);
}

#[test]
fn test_eaten_bacteria_do_not_act_later_in_the_tick() {
    let params = create_test_params();
    let mut rng = create_rng(12);
    // first eats second; second would lose to third, which first cannot reach
    let first = idle_bacterium(0, 100.0, 10.0, 5.0, &params, &mut rng);
    let second = idle_bacterium(1, 104.0, 5.0, 20.0, &params, &mut rng);
    let third = idle_bacterium(2, 106.0, 6.0, 50.0, &params, &mut rng);
    let mut ecosystem = Ecosystem::from_parts(vec![first, second, third], Vec::new());

    ecosystem.step(&params, &mut rng).unwrap();

    let ids: Vec<usize> = ecosystem.bacteria.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![0, 2]);
    assert_eq!(ecosystem.bacteria[0].energy, 15.0);
    assert_eq!(ecosystem.bacteria[1].energy, 50.0);
}

#[test]
fn test_dead_bacteria_do_not_act() {
    let params = create_test_params();
    let mut rng = create_rng(13);
    let dead = idle_bacterium(0, 100.0, 10.0, 0.0, &params, &mut rng);
    let food = vec![Food::new(0, 101.0, 100.0, 30.0)];
    let mut ecosystem = Ecosystem::from_parts(vec![dead], food);

    ecosystem.step(&params, &mut rng).unwrap();

    assert!(ecosystem.is_extinct());
    assert_eq!(ecosystem.food.len(), 1);
}
