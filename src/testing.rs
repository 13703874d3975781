//! Helpers shared by the unit tests of several modules.

use std::collections::{HashMap, VecDeque};

use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    maze::{Maze, Position},
    movement::Direction,
};

/// Generates a maze from a fixed seed.
pub(crate) fn seeded_maze(size: usize, seed: u64) -> Maze {
    let mut rng = StdRng::seed_from_u64(seed);
    Maze::generate(size, &mut rng).expect("positive sizes should generate")
}

/// Finds the directions leading from the start to the goal through open passages.
///
/// The route is empty when the start is the goal.
pub(crate) fn route_to_goal(maze: &Maze) -> Vec<Direction> {
    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([maze.start()]);

    while let Some(position) = queue.pop_front() {
        for direction in Direction::ALL {
            if let Some(next) = maze.passage(position, direction) {
                if next != maze.start() && !came_from.contains_key(&next) {
                    let _ = came_from.insert(next, (position, direction));
                    queue.push_back(next);
                }
            }
        }
    }

    let mut route = Vec::new();
    let mut position = maze.goal();
    while let Some(&(previous, direction)) = came_from.get(&position) {
        route.push(direction);
        position = previous;
    }
    route.reverse();
    route
}
