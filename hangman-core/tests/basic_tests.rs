mod common;

use common::*;
use hangman_core::{GameEvent, GameEventBus, GuessOutcome, StatisticsCache};
use hangman_types::GameStatus;

#[test]
fn test_game_creation() {
    let game = create_game_with_phrase("hello world", 4);
    assert_eq!(game.state.visible_so_far.chars().count(), 11);
    assert!(game.state.visible_so_far.chars().all(|c| c == '?'));
    assert_eq!(game.state.mistakes_remaining, game.state.mistakes_allowed);
    assert!(!game.is_over());
}

#[test]
fn test_losing_scenario() {
    let mut game = create_game_with_phrase("cat", 2);

    let outcome = game.apply_guess("z").unwrap();
    assert_eq!(outcome, GuessOutcome::Miss('z'));
    assert_eq!(game.state.visible_so_far, "???");
    assert_eq!(game.state.mistakes_remaining, 1);
    assert!(!game.is_over());

    let outcome = game.apply_guess("x").unwrap();
    let termination = outcome.termination().expect("game should have ended");
    assert!(!termination.won);
    assert_eq!(termination.phrase_length, 3);
    assert_eq!(termination.mistakes_remaining, 0);
    assert_eq!(game.state.mistakes_remaining, 0);
    assert_eq!(game.status(), GameStatus::Lost);
    assert_eq!(outcome.message(game.phrase()), "Nope, you lose! The correct word was: cat");

    let before = game.state.clone();
    let outcome = game.apply_guess("c").unwrap();
    assert_eq!(outcome, GuessOutcome::AlreadyOver);
    assert_eq!(game.state, before);
}

#[test]
fn test_winning_scenario() {
    let mut game = create_standard_game();

    play(&mut game, "c");
    assert_eq!(game.state.visible_so_far, "c??");
    play(&mut game, "a");
    assert_eq!(game.state.visible_so_far, "ca?");

    let outcome = game.apply_guess("t").unwrap();
    assert_eq!(game.state.visible_so_far, "cat");
    assert!(game.is_over());
    assert_eq!(game.status(), GameStatus::Won);
    assert!(outcome.termination().unwrap().won);
    assert_eq!(game.state.mistakes_remaining, 6);

    let outcome = game.apply_guess("q").unwrap();
    assert_eq!(outcome, GuessOutcome::AlreadyOver);
    assert_eq!(game.state.letters_guessed, "cat");
}

#[test]
fn test_repeat_guess_never_mutates() {
    let mut game = create_game_with_phrase("apple", 6);
    play(&mut game, "pz");
    let before = game.state.clone();

    let outcomes = play(&mut game, "pz");
    assert_eq!(
        outcomes,
        vec![GuessOutcome::AlreadyGuessed('p'), GuessOutcome::AlreadyGuessed('z')]
    );
    assert_eq!(game.state, before);
}

#[test]
fn test_miss_never_changes_visible_string() {
    let mut game = create_game_with_phrase("rust", 6);
    play(&mut game, "r");

    for (i, letter) in "abcde".chars().enumerate() {
        let visible = game.state.visible_so_far.clone();
        game.apply_guess(&letter.to_string()).unwrap();
        assert_eq!(game.state.visible_so_far, visible);
        assert_eq!(game.state.mistakes_remaining, 6 - (i as i32 + 1));
    }
}

#[test]
fn test_hit_reveals_exactly_matching_positions() {
    let mut game = create_game_with_phrase("mississippi", 6);
    play(&mut game, "s");

    let revealed: Vec<usize> = game
        .state
        .visible_so_far
        .char_indices()
        .filter(|(_, c)| *c == 's')
        .map(|(i, _)| i)
        .collect();
    assert_eq!(revealed, vec![2, 3, 5, 6]);
    assert_eq!(game.state.visible_so_far.matches('?').count(), 7);
    assert_eq!(game.state.mistakes_remaining, 6);
}

#[test]
fn test_phrase_with_space_cannot_be_completed() {
    // Spaces start hidden and cannot be guessed, so multi-word phrases only end in a loss
    let mut game = create_game_with_phrase("a b", 1);
    play(&mut game, "ab");
    assert_eq!(game.state.visible_so_far, "a?b");
    assert!(!game.is_over());

    play(&mut game, "z");
    assert_eq!(game.status(), GameStatus::Lost);
}

#[test]
fn test_statistics_over_games() {
    let cache = StatisticsCache::new();
    let mut games: Vec<_> = [1, 3, 5, 7]
        .into_iter()
        .map(|allowed| create_game_with_phrase("cat", allowed))
        .collect();

    let remaining: Vec<i32> = games
        .iter()
        .filter(|g| !g.is_over())
        .map(|g| g.state.mistakes_remaining)
        .collect();
    cache.recompute(&remaining);
    assert_eq!(cache.read(), "The average moves remaining is 4.00");

    // End every game; the cached value must survive a recompute with nothing in progress
    for game in &mut games {
        play(game, "cat");
    }
    let remaining: Vec<i32> = games
        .iter()
        .filter(|g| !g.is_over())
        .map(|g| g.state.mistakes_remaining)
        .collect();
    assert!(cache.recompute(&remaining).is_none());
    assert_eq!(cache.read(), "The average moves remaining is 4.00");
}

#[test]
fn test_event_collector_receives_published_events() {
    let collector = EventCollector::new();
    let mut bus = GameEventBus::new();
    bus.add_handler(Box::new(collector.clone()));

    let game = create_standard_game();
    bus.publish(GameEvent::GameCreated {
        game_id: game.state.id,
        user_id: game.state.user_id,
        mistakes_allowed: game.state.mistakes_allowed,
    });

    assert_eq!(collector.event_count(), 1);
    assert_eq!(collector.get_events()[0].game_id(), game.state.id);
}
