//! End-to-end searches over parsed layouts.

use voxnav_core::{Aabb, BlockPos, Vec3};
use voxnav_paths::{Action, AgentKind, PathFinder, PathNode, PathRequest, SearchOutcome};

use crate::layout::Layout;

fn finder() -> PathFinder<rand::rngs::ThreadRng> {
    PathFinder::new(rand::rng())
}

fn request(l: &Layout, max_fall: i32) -> PathRequest {
    PathRequest::new(
        l.start.unwrap(),
        l.end.unwrap(),
        max_fall,
        1.01,
        Aabb::centered(0.6, 1.8),
    )
}

fn positions(path: &[PathNode]) -> Vec<BlockPos> {
    path.iter().map(|n| n.pos).collect()
}

fn actions(path: &[PathNode]) -> Vec<Action> {
    path.iter().map(|n| n.action).collect()
}

const STAIRS: &str = "\
--- y=0
#####
--- y=1
S.###
--- y=2
...##
--- y=3
....#
--- y=4
....E
";

#[test]
fn climbs_stairs() {
    let mut l = Layout::parse(STAIRS).unwrap();
    let req = request(&l, 3);
    let path = finder().find_path(&mut l.world, &req).unwrap();
    assert_eq!(
        positions(&path),
        vec![
            BlockPos::new(1, 1, 0),
            BlockPos::new(2, 2, 0),
            BlockPos::new(3, 3, 0),
            BlockPos::new(4, 4, 0),
        ]
    );
    assert_eq!(
        actions(&path),
        vec![Action::Walk, Action::Climb, Action::Climb, Action::Climb]
    );
}

#[test]
fn descends_stairs() {
    let mut l = Layout::parse(STAIRS).unwrap();
    let req = PathRequest::new(
        BlockPos::new(4, 4, 0),
        BlockPos::new(0, 1, 0),
        3,
        1.01,
        Aabb::centered(0.6, 1.8),
    );
    let path = finder().find_path(&mut l.world, &req).unwrap();
    assert_eq!(
        positions(&path),
        vec![
            BlockPos::new(3, 3, 0),
            BlockPos::new(2, 2, 0),
            BlockPos::new(1, 1, 0),
            BlockPos::new(0, 1, 0),
        ]
    );
    assert_eq!(path[0].action, Action::Fall);
}

const RIVER: &str = "\
--- y=0
#~~~#
--- y=1
S...E
";

#[test]
fn swims_across_river() {
    let mut l = Layout::parse(RIVER).unwrap();
    let req = request(&l, 3);
    let mut pf = finder();
    let path = pf.find_path(&mut l.world, &req).unwrap();
    assert_eq!(
        actions(&path),
        vec![Action::Swim, Action::Swim, Action::Swim, Action::Walk]
    );
    // Four unit steps plus three water cells at 2.0 each.
    assert!((path[3].g - 10.0).abs() < 1e-4);

    let req = req.with_agent(AgentKind::LandCreature);
    let path = pf.find_path(&mut l.world, &req).unwrap();
    assert!((path[3].g - 28.0).abs() < 1e-4);
}

const LAVA: &str = "\
--- y=0
#^#
--- y=1
S.E
";

#[test]
fn lava_only_for_heat_proof() {
    let mut l = Layout::parse(LAVA).unwrap();
    let mut pf = finder();

    let req = request(&l, 3);
    assert!(pf.find_path(&mut l.world, &req).is_none());
    assert_eq!(pf.outcome(), SearchOutcome::Exhausted);

    let req = req.with_agent(AgentKind::HeatProof);
    let path = pf.find_path(&mut l.world, &req).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[0].action, Action::Swim);
    assert_eq!(pf.outcome(), SearchOutcome::Found);
}

const CLIFF: &str = "\
--- y=0
#####
--- y=1
....E
--- y=4
#....
--- y=5
S....
";

#[test]
fn cliff_respects_fall_limit() {
    let mut l = Layout::parse(CLIFF).unwrap();
    let mut pf = finder();

    let req = request(&l, 3);
    assert!(pf.find_path(&mut l.world, &req).is_none());

    let req = request(&l, 4);
    let path = pf.find_path(&mut l.world, &req).unwrap();
    assert_eq!(path[0].pos, BlockPos::new(1, 1, 0));
    assert_eq!(path[0].action, Action::Fall);
    assert_eq!(path.last().map(|n| n.pos), l.end);
}

const FENCED: &str = "\
--- y=0
#####
#####
--- y=1
S.|.E
..#..
";

#[test]
fn fence_forces_climb_over_block() {
    let mut l = Layout::parse(FENCED).unwrap();
    let req = request(&l, 3);
    let path = finder().find_path(&mut l.world, &req).unwrap();
    let crossing: Vec<BlockPos> = positions(&path).into_iter().filter(|p| p.x == 2).collect();
    assert_eq!(crossing, vec![BlockPos::new(2, 2, 1)]);
    assert_eq!(path.last().map(|n| n.pos), l.end);
}

#[test]
fn waypoints_end_at_target() {
    let mut l = Layout::parse(STAIRS).unwrap();
    let req = request(&l, 3);
    let mut pf = finder();
    let wps = pf.find_path_as_waypoints(&mut l.world, &req).unwrap();
    assert_eq!(wps.len(), 5);
    assert_eq!(wps.last().copied(), Some(Vec3::new(4.5, 4.0, 0.5)));
    let j = pf.jitter();
    assert_eq!(wps[0], Vec3::new(1.0 + j.x, 1.0, j.z));
}

#[test]
fn each_search_takes_one_snapshot() {
    let mut l = Layout::parse(RIVER).unwrap();
    let req = request(&l, 3);
    let mut pf = finder();
    pf.find_path(&mut l.world, &req);
    pf.find_path(&mut l.world, &req);
    assert_eq!(l.world.snapshots(), 2);
}
