use arenasim::scene::{populate, FleetSpec};
use arenasim::{Arena, Boundary, Entity, Error, Result, SimConfig, Snapshot, World};
use glam::DVec2;

fn fleet(seed: u64) -> Result<World> {
    let mut world = World::new(Arena::new(900.0, 700.0)?, SimConfig::default())?;
    populate(
        &mut world,
        &FleetSpec {
            ships: 12,
            seed: Some(seed),
            ..FleetSpec::default()
        },
    )?;
    Ok(world)
}

fn assert_close(a: &Snapshot, b: &Snapshot, tol: f64) {
    assert_eq!(a.entities.len(), b.entities.len());
    for (x, y) in a.entities.iter().zip(&b.entities) {
        assert_eq!(x.id, y.id);
        assert!(
            (x.position - y.position).length() < tol,
            "{} diverged: {} vs {}",
            x.id,
            x.position,
            y.position
        );
        assert!((x.velocity - y.velocity).length() < tol);
    }
}

/// The example from the collision model: two bodies 20 apart, closing at 1, radii sum 12.
#[test]
fn closing_pair_contacts_at_eight() -> Result<()> {
    let cfg = SimConfig::default();
    let mut world = World::new(Arena::new(100.0, 100.0)?, cfg.clone())?;
    let a = world.add_entity(Entity::ship(
        DVec2::new(30.0, 50.0),
        DVec2::new(0.5, 0.0),
        10.0,
        0.0,
        &cfg,
    )?)?;
    let b = world.add_entity(Entity::bullet(
        DVec2::new(50.0, 50.0),
        DVec2::new(-0.5, 0.0),
        2.0,
        &cfg,
    )?)?;
    let t = world.time_to_collision(a, b)?.expect("contact");
    assert!((t - 8.0).abs() < 1e-12);
    assert_eq!(world.time_to_collision(b, a)?, Some(t));
    Ok(())
}

#[test]
fn split_evolve_matches_single_call() -> Result<()> {
    let mut once = fleet(31)?;
    let mut split = fleet(31)?;
    once.evolve(12.0)?;
    split.evolve(3.0)?;
    split.evolve(4.5)?;
    split.evolve(4.5)?;
    assert!((once.time() - split.time()).abs() < 1e-12);
    assert_close(&once.snapshot(), &split.snapshot(), 1e-6);
    Ok(())
}

#[test]
fn rebuild_matches_incremental() -> Result<()> {
    let mut incremental = fleet(8)?;
    let mut rebuilt = fleet(8)?;
    for _ in 0..6 {
        incremental.evolve(2.0)?;
        rebuilt.evolve(2.0)?;
        rebuilt.rebuild_event_queue()?;
    }
    assert_close(&incremental.snapshot(), &rebuilt.snapshot(), 1e-6);
    Ok(())
}

#[test]
fn snapshot_is_an_independent_copy() -> Result<()> {
    let mut world = fleet(3)?;
    let first = world.snapshot();
    assert_eq!(first, world.snapshot());
    world.evolve(5.0)?;
    assert_eq!(first.time, 0.0);
    assert_ne!(first, world.snapshot());
    let json = first.to_json()?;
    assert!(json.contains("\"kind\":\"ship\""));
    Ok(())
}

#[test]
fn tangent_approach_collides_immediately() -> Result<()> {
    let cfg = SimConfig::default();
    let mut world = World::new(Arena::new(300.0, 300.0)?, cfg.clone())?;
    let a = world.add_entity(Entity::ship(
        DVec2::new(100.0, 150.0),
        DVec2::new(1.0, 0.0),
        10.0,
        0.0,
        &cfg,
    )?)?;
    let b = world.add_entity(Entity::ship(
        DVec2::new(120.0, 150.0),
        DVec2::new(-1.0, 0.0),
        10.0,
        0.0,
        &cfg,
    )?)?;
    assert_eq!(world.time_to_collision(a, b)?, Some(0.0));

    let report = world.evolve(1.0)?;
    assert_eq!(report.events, 1);
    let va = world.entity(a).expect("a").velocity();
    assert!((va.x + 1.0).abs() < 1e-12);
    Ok(())
}

#[test]
fn bad_durations_leave_world_untouched() -> Result<()> {
    let mut world = fleet(4)?;
    let before = world.snapshot();
    for d in [-1.0, f64::NAN, f64::NEG_INFINITY] {
        assert!(matches!(world.evolve(d), Err(Error::InvalidParam(_))));
    }
    assert_eq!(before, world.snapshot());
    Ok(())
}

#[test]
fn split_evolve_matches_single_call_while_thrusting() -> Result<()> {
    let cfg = SimConfig {
        thrust_force: 1e16,
        ..SimConfig::default()
    };
    let build = || -> Result<World> {
        let mut world = World::new(Arena::new(100_000.0, 100_000.0)?, cfg.clone())?;
        let s = world.add_entity(Entity::ship(
            DVec2::new(50_000.0, 50_000.0),
            DVec2::ZERO,
            10.0,
            0.0,
            &cfg,
        )?)?;
        world.set_thruster_active(s, true)?;
        Ok(world)
    };
    let mut once = build()?;
    let mut split = build()?;
    once.evolve(2.0)?;
    split.evolve(1.0)?;
    split.evolve(1.0)?;
    assert_close(&once.snapshot(), &split.snapshot(), 1e-9);

    // Constant acceleration from rest: x = a t^2 / 2.
    let ship = once.entities().next().map(|(_, e)| e.clone()).expect("ship");
    let a = cfg.thrust_force / ship.mass();
    assert!((ship.position().x - (50_000.0 + 2.0 * a)).abs() < 1e-9);
    assert!((ship.velocity().x - 2.0 * a).abs() < 1e-9);
    Ok(())
}

#[test]
fn ships_collide_across_the_wrap_seam() -> Result<()> {
    let cfg = SimConfig::default();
    let mut world = World::new(
        Arena::with_boundary(1000.0, 1000.0, Boundary::Wrap)?,
        cfg.clone(),
    )?;
    let a = world.add_entity(Entity::ship(
        DVec2::new(980.0, 500.0),
        DVec2::new(10.0, 0.0),
        10.0,
        0.0,
        &cfg,
    )?)?;
    let b = world.add_entity(Entity::ship(
        DVec2::new(30.0, 500.0),
        DVec2::new(-10.0, 0.0),
        10.0,
        0.0,
        &cfg,
    )?)?;
    // Gap through the seam is 50, rims 20, closing at 20.
    let t = world.time_to_collision(a, b)?.expect("contact");
    assert!((t - 1.5).abs() < 1e-12);

    let report = world.evolve(3.0)?;
    assert!(report.events >= 1);
    assert!(report.destroyed.is_empty());
    let (va, vb) = (
        world.entity(a).expect("a").velocity(),
        world.entity(b).expect("b").velocity(),
    );
    assert!((va - DVec2::new(-10.0, 0.0)).length() < 1e-9);
    assert!((vb - DVec2::new(10.0, 0.0)).length() < 1e-9);
    Ok(())
}
