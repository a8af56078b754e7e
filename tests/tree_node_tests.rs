//! Game tree node expansion tests

mod common;

use common::{board, open_duel, snake};
use snake_search::game::Simulation;
use snake_search::node::{GameTreeNode, NodeKind, CHANCE_SAMPLE_COUNT};
use snake_search::types::{Coord, Direction};

#[test]
fn test_chance_node_yields_five_targeted_children() {
    let mut state = open_duel();
    state.target = None;
    let node = GameTreeNode::new(state, 1);
    assert_eq!(node.kind(), NodeKind::Chance);

    let children = node.children();
    assert_eq!(children.len(), CHANCE_SAMPLE_COUNT);
    assert_eq!(children.len(), 5);
    for child in &children {
        assert!(child.state().has_target());
        assert_eq!(child.kind(), NodeKind::Decision);
        assert_eq!(child.current_player(), 1);
        // Nobody moved
        assert_eq!(child.state().snakes, node.state().snakes);
    }
}

#[test]
fn test_decision_node_yields_four_children_in_fixed_order() {
    let node = GameTreeNode::new(open_duel(), 0);
    assert_eq!(node.kind(), NodeKind::Decision);

    let children = node.children();
    assert_eq!(children.len(), 4);
    let order: Vec<Direction> = children.iter().map(|c| c.orientation_of(0)).collect();
    assert_eq!(
        order,
        vec![Direction::North, Direction::East, Direction::South, Direction::West]
    );
    for child in &children[..3] {
        assert_eq!(child.current_player(), 1);
    }
    // West reverses onto the neck; the lone survivor ends the game
    assert!(children[3].state().is_dead(0));
    assert!(children[3].state().is_game_over());
    assert_eq!(children[3].current_player(), 0);
    assert_eq!(children[1].state().head(0), Some(Coord::new(2, 3)));
}

#[test]
fn test_decision_child_skips_dead_players() {
    let state = board(
        9,
        9,
        vec![
            snake(&[(4, 4)], Direction::North),
            snake(&[(0, 0)], Direction::North),
            snake(&[(8, 8)], Direction::North),
        ],
        Some((2, 6)),
    );
    // Player 2 moves; player 0 is next unless it is dead
    let mut with_dead_zero = state.clone();
    with_dead_zero.snakes[0].alive = false;
    with_dead_zero.snakes[0].body.clear();

    let children = GameTreeNode::new(with_dead_zero, 2).children();
    // South and East run off the board and end the game for player 2
    for child in &children {
        if child.state().is_game_over() {
            assert_eq!(child.current_player(), 2);
        } else {
            assert_eq!(child.current_player(), 1);
        }
    }
    assert!(!children[0].state().is_dead(2));
}

#[test]
fn test_game_over_keeps_mover() {
    // Player 1 sits in the corner; most of its moves end the game
    let state = board(
        5,
        5,
        vec![
            snake(&[(2, 2)], Direction::North),
            snake(&[(4, 4), (3, 4), (2, 4)], Direction::East),
        ],
        Some((0, 0)),
    );
    let children = GameTreeNode::new(state, 1).children();
    // East and South leave the board
    for i in [1, 2] {
        assert!(children[i].state().is_game_over());
        assert_eq!(children[i].current_player(), 1);
    }
    // North survives and hands the turn back to player 0
    assert!(!children[0].state().is_game_over());
    assert_eq!(children[0].current_player(), 0);
}

#[test]
fn test_children_do_not_share_state_with_parent() {
    let node = GameTreeNode::new(open_duel(), 0);
    let before = node.state().clone();
    let children = node.children();
    let sibling = children[1].state().clone();

    let mut mutated = children[0].state().clone();
    mutated.update_player_position(1);
    mutated.target = None;

    assert_eq!(node.state(), &before);
    assert_eq!(children[1].state(), &sibling);
    assert!(children[0].state().has_target());
}
