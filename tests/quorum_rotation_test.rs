use staking_pool::{oracle::quorum_for, rotation::next_cursor};

#[test]
fn quorum_is_floored_by_min_quorum() {
    let expected = [(1, 5), (2, 5), (3, 5), (4, 5), (5, 5), (6, 5), (8, 5)];
    for (active, quorum) in expected {
        assert_eq!(quorum_for(active, 5), quorum, "active oracles: {active}");
    }
}

#[test]
fn quorum_follows_three_fifths_above_min() {
    assert_eq!(quorum_for(10, 5), 6);
    assert_eq!(quorum_for(11, 5), 6);
    assert_eq!(quorum_for(15, 5), 9);
    assert_eq!(quorum_for(5, 1), 3);
    assert_eq!(quorum_for(4, 1), 2);
}

#[test]
fn quorum_with_no_active_oracles_uses_min() {
    assert_eq!(quorum_for(0, 1), 1);
    assert_eq!(quorum_for(1, 1), 1);
}

#[test]
fn cursor_wraps_around() {
    assert_eq!(next_cursor(0, 3), 1);
    assert_eq!(next_cursor(1, 3), 2);
    assert_eq!(next_cursor(2, 3), 0);
    assert_eq!(next_cursor(0, 1), 0);
}

#[test]
fn cursor_on_empty_rotation_stays_at_zero() {
    assert_eq!(next_cursor(0, 0), 0);
    assert_eq!(next_cursor(4, 0), 0);
}
