use super::*;

fn context(current_index: usize, item_count: usize) -> PagingContext {
    PagingContext::new(current_index, item_count, PagingMode::Standard)
}

#[test]
fn vertical_pan_is_claimed_when_vertical_dismiss_enabled() {
    let ctx = context(2, 5);
    let up = Vector2::new(10.0, -800.0);
    assert!(should_claim(up, &ctx, SwipeToDismissMode::ALWAYS));
    assert!(should_claim(up, &ctx, SwipeToDismissMode::VERTICAL));
    assert!(!should_claim(up, &ctx, SwipeToDismissMode::HORIZONTAL));
}

#[test]
fn diagonal_tie_goes_to_vertical() {
    let ctx = context(2, 5);
    for velocity in [
        Vector2::new(300.0, 300.0),
        Vector2::new(-300.0, 300.0),
        Vector2::new(300.0, -300.0),
    ] {
        assert!(should_claim(velocity, &ctx, SwipeToDismissMode::VERTICAL));
        assert!(!should_claim(velocity, &ctx, SwipeToDismissMode::HORIZONTAL));
    }
}

#[test]
fn horizontal_pan_in_the_middle_pages() {
    let ctx = context(2, 5);
    assert!(!should_claim(Vector2::new(900.0, 0.0), &ctx, SwipeToDismissMode::ALWAYS));
    assert!(!should_claim(Vector2::new(-900.0, 0.0), &ctx, SwipeToDismissMode::ALWAYS));
}

#[test]
fn horizontal_pan_away_from_the_ends_is_claimed() {
    let first = context(0, 5);
    assert!(should_claim(Vector2::new(900.0, 10.0), &first, SwipeToDismissMode::ALWAYS));
    assert!(!should_claim(Vector2::new(-900.0, 10.0), &first, SwipeToDismissMode::ALWAYS));

    let last = context(4, 5);
    assert!(should_claim(Vector2::new(-900.0, 10.0), &last, SwipeToDismissMode::ALWAYS));
    assert!(!should_claim(Vector2::new(900.0, 10.0), &last, SwipeToDismissMode::ALWAYS));
}

#[test]
fn carousel_never_claims_horizontal_pans() {
    let ctx = PagingContext::new(0, 5, PagingMode::Carousel);
    assert!(!should_claim(Vector2::new(900.0, 0.0), &ctx, SwipeToDismissMode::ALWAYS));
}

#[test]
fn horizontal_claim_requires_horizontal_mode() {
    let ctx = context(0, 5);
    assert!(!should_claim(Vector2::new(900.0, 0.0), &ctx, SwipeToDismissMode::VERTICAL));
}

#[test]
fn still_pointer_is_declined() {
    let ctx = context(0, 1);
    assert!(!should_claim(Vector2::ZERO, &ctx, SwipeToDismissMode::ALWAYS));
    assert!(!should_claim(Vector2::new(0.5, -0.5), &ctx, SwipeToDismissMode::ALWAYS));
}

#[test]
fn arbiter_locks_first_decision_until_reset() {
    let ctx = context(2, 5);
    let mut arbiter = GestureArbiter::new();
    assert!(arbiter.arbitrate(Vector2::new(0.0, 800.0), &ctx, SwipeToDismissMode::ALWAYS));
    // A later horizontal velocity does not hijack the gesture.
    assert!(arbiter.arbitrate(Vector2::new(900.0, 0.0), &ctx, SwipeToDismissMode::ALWAYS));
    assert_eq!(arbiter.decision(), Some(true));

    arbiter.reset();
    assert!(!arbiter.arbitrate(Vector2::new(900.0, 0.0), &ctx, SwipeToDismissMode::ALWAYS));
}
