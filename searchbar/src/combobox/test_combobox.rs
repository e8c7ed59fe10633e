// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{sync::{Arc, Mutex},
          time::Duration};

use test_case::test_case;
use tokio::time::Instant;

use crate::{GENERIC_LOOKUP_FAILURE_MSG, Lookup, LookupResponse, NavigationKey,
            SearchBarEffect, SearchBarEffects, SearchBarEvent, SearchBarMachine,
            SearchBarOptions, SearchToken, assert_eq2};

fn ms(it: u64) -> Duration { Duration::from_millis(it) }

fn names() -> Vec<String> { vec!["Ann".into(), "Bob".into(), "Cy".into()] }

/// Machine with an injected list and no lookup.
fn injected_machine() -> SearchBarMachine<String> {
    let options = SearchBarOptions::new().results(names());
    SearchBarMachine::new(&options).unwrap()
}

/// Machine with a sync lookup that records every query it sees.
fn recording_machine(min_chars: usize) -> (SearchBarMachine<String>, Arc<Mutex<Vec<String>>>) {
    let calls = Arc::new(Mutex::new(vec![]));
    let calls_clone = calls.clone();
    let options = SearchBarOptions::new()
        .min_chars(min_chars)
        .lookup(Lookup::from_sync(move |query: &str| {
            calls_clone.lock().unwrap().push(query.to_string());
            Ok(names()
                .into_iter()
                .filter(|it| it.to_lowercase().contains(&query.to_lowercase()))
                .collect::<Vec<_>>())
        }));
    (SearchBarMachine::new(&options).unwrap(), calls)
}

/// Machine with an async lookup. The futures are never polled here, tests feed results
/// straight into [`SearchBarMachine::ingest_lookup`].
fn async_machine() -> SearchBarMachine<String> {
    let options = SearchBarOptions::new()
        .min_chars(1)
        .lookup(Lookup::from_async(|_: String| async {
            Ok::<_, miette::Report>(Vec::<String>::new())
        }));
    SearchBarMachine::new(&options).unwrap()
}

fn selections(effects: &SearchBarEffects<String>) -> Vec<String> {
    effects
        .iter()
        .filter_map(|it| match it {
            SearchBarEffect::Select(item) => Some(item.clone()),
            _ => None,
        })
        .collect()
}

fn spawned_token(effects: &SearchBarEffects<String>) -> Option<SearchToken> {
    effects.iter().find_map(|it| match it {
        SearchBarEffect::SpawnLookup(pending) => Some(pending.token),
        _ => None,
    })
}

fn open_with_focus(machine: &mut SearchBarMachine<String>, now: Instant) {
    machine.apply(SearchBarEvent::Focus, now);
    assert!(machine.is_open());
}

#[test]
fn burst_of_keystrokes_searches_once_with_last_query() {
    let t0 = Instant::now();
    let (mut machine, calls) = recording_machine(2);

    for (offset, text) in ["b", "bo", "bob"].iter().enumerate() {
        let now = t0 + ms(100 * offset as u64);
        machine.apply(SearchBarEvent::TextChanged((*text).to_string()), now);
        machine.fire_due_timers(now);
    }

    // Last keystroke at 200ms, window is 300ms.
    machine.fire_due_timers(t0 + ms(499));
    assert!(calls.lock().unwrap().is_empty());

    machine.fire_due_timers(t0 + ms(500));
    machine.fire_due_timers(t0 + ms(2_000));

    assert_eq2!(*calls.lock().unwrap(), vec!["bob".to_string()]);
    assert_eq2!(machine.snapshot().results, vec!["Bob".to_string()]);
}

#[test]
fn stale_response_is_discarded() {
    let t0 = Instant::now();
    let mut machine = async_machine();

    machine.apply(SearchBarEvent::TextChanged("abc".into()), t0);
    let effects = machine.fire_due_timers(t0 + ms(300));
    let token_a = spawned_token(&effects).unwrap();
    assert!(machine.snapshot().is_loading);

    machine.apply(SearchBarEvent::TextChanged("abcd".into()), t0 + ms(400));
    let effects = machine.fire_due_timers(t0 + ms(700));
    let token_b = spawned_token(&effects).unwrap();

    // B resolves first, then A.
    assert!(machine.ingest_lookup(token_b, Ok(vec!["from b".to_string()].into())));
    let revision = machine.revision();
    assert!(!machine.ingest_lookup(token_a, Ok(vec!["from a".to_string()].into())));

    let snapshot = machine.snapshot();
    assert_eq2!(snapshot.results, vec!["from b".to_string()]);
    assert_eq2!(snapshot.revision, revision);
    assert!(!snapshot.is_loading);
}

#[test_case(1, Some(0) ; "one press")]
#[test_case(3, Some(2) ; "exactly n presses")]
#[test_case(10, Some(2) ; "more presses than items")]
fn arrow_down_clamps(presses: usize, expected: Option<usize>) {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    for _ in 0..presses {
        machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    }

    assert_eq2!(machine.active_index(), expected);
}

#[test]
fn arrow_up_starts_at_last_and_clamps_at_zero() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowUp), t0);
    assert_eq2!(machine.active_index(), Some(2));

    for _ in 0..5 {
        machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowUp), t0);
    }
    assert_eq2!(machine.active_index(), Some(0));
}

#[test]
fn navigation_ignored_when_closed() {
    let t0 = Instant::now();
    let mut machine = injected_machine();

    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    let effects = machine.apply(SearchBarEvent::KeyDown(NavigationKey::Enter), t0);

    assert_eq2!(machine.active_index(), None);
    assert!(effects.is_empty());
}

#[test]
fn enter_selects_active_item_exactly_once_and_closes() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    let effects = machine.apply(SearchBarEvent::KeyDown(NavigationKey::Enter), t0);

    assert_eq2!(selections(&effects), vec!["Bob".to_string()]);
    assert!(!machine.is_open());

    // A second Enter on the closed list does nothing.
    let effects = machine.apply(SearchBarEvent::KeyDown(NavigationKey::Enter), t0);
    assert!(selections(&effects).is_empty());
}

#[test]
fn enter_without_active_index_is_noop() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    let effects = machine.apply(SearchBarEvent::KeyDown(NavigationKey::Enter), t0);

    assert!(effects.is_empty());
    assert!(machine.is_open());
}

#[test]
fn escape_resets_without_selecting() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);
    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);

    let effects = machine.apply(SearchBarEvent::KeyDown(NavigationKey::Escape), t0);

    assert!(effects.is_empty());
    assert!(!machine.is_open());
    assert_eq2!(machine.active_index(), None);
}

#[test]
fn escape_works_on_closed_empty_list() {
    let t0 = Instant::now();
    let (mut machine, _calls) = recording_machine(2);
    machine.apply(SearchBarEvent::TextChanged("z".into()), t0);
    assert!(machine.is_open());

    machine.apply(SearchBarEvent::KeyDown(NavigationKey::Escape), t0);

    assert!(!machine.is_open());
}

#[test]
fn min_chars_gate() {
    let t0 = Instant::now();
    let (mut machine, calls) = recording_machine(2);

    machine.apply(SearchBarEvent::TextChanged("a".into()), t0);
    machine.fire_due_timers(t0 + ms(300));
    assert!(calls.lock().unwrap().is_empty());
    assert!(machine.results().is_empty());

    machine.apply(SearchBarEvent::TextChanged("an".into()), t0 + ms(400));
    machine.fire_due_timers(t0 + ms(700));
    assert_eq2!(*calls.lock().unwrap(), vec!["an".to_string()]);
    assert_eq2!(machine.results(), &["Ann".to_string()]);
}

#[test]
fn pointer_down_during_blur_grace_still_selects() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    machine.apply(SearchBarEvent::Blur, t0);
    let effects = machine.apply(SearchBarEvent::OptionPointerDown(1), t0 + ms(50));
    machine.fire_due_timers(t0 + ms(100));

    assert_eq2!(selections(&effects), vec!["Bob".to_string()]);
    assert!(!machine.is_open());
}

#[test]
fn pointer_down_before_blur_selects_once() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    let effects = machine.apply(SearchBarEvent::OptionPointerDown(2), t0);
    machine.apply(SearchBarEvent::Blur, t0 + ms(1));
    let timer_effects = machine.fire_due_timers(t0 + ms(101));

    assert_eq2!(selections(&effects), vec!["Cy".to_string()]);
    assert!(timer_effects.is_empty());
    assert!(!machine.is_open());
}

#[test]
fn blur_grace_elapses_then_pointer_is_ignored() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    machine.apply(SearchBarEvent::Blur, t0);
    assert!(machine.is_open());
    assert_eq2!(machine.active_index(), None);

    machine.fire_due_timers(t0 + ms(100));
    assert!(!machine.is_open());

    let effects = machine.apply(SearchBarEvent::OptionPointerDown(0), t0 + ms(150));
    assert!(effects.is_empty());
}

#[test]
fn focus_cancels_pending_blur_close() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    machine.apply(SearchBarEvent::Blur, t0);
    machine.apply(SearchBarEvent::Focus, t0 + ms(50));
    machine.fire_due_timers(t0 + ms(500));

    assert!(machine.is_open());
    assert_eq2!(machine.next_deadline(), None);
}

#[test]
fn out_of_range_pointer_is_ignored() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);

    let effects = machine.apply(SearchBarEvent::OptionPointerDown(3), t0);

    assert!(effects.is_empty());
    assert!(machine.is_open());
}

#[test]
fn empty_query_is_idempotent() {
    let t0 = Instant::now();
    let (mut machine, calls) = recording_machine(0);

    machine.apply(SearchBarEvent::TextChanged("b".into()), t0);
    machine.fire_due_timers(t0 + ms(300));
    assert_eq2!(machine.results(), &["Bob".to_string()]);
    machine.apply(SearchBarEvent::KeyDown(NavigationKey::Escape), t0 + ms(310));
    assert!(!machine.is_open());

    // Programmatic clear, which does not open the list.
    machine.apply(SearchBarEvent::SetValue(String::new()), t0 + ms(400));
    machine.fire_due_timers(t0 + ms(700));

    assert!(machine.results().is_empty());
    assert!(!machine.is_open());
    assert_eq2!(calls.lock().unwrap().len(), 1);
}

#[test]
fn nothing_changes_after_dispose() {
    let t0 = Instant::now();
    let mut machine = async_machine();

    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0);
    let token = spawned_token(&machine.fire_due_timers(t0 + ms(300))).unwrap();
    machine.apply(SearchBarEvent::TextChanged("abc".into()), t0 + ms(310));
    machine.apply(SearchBarEvent::Blur, t0 + ms(310));

    machine.dispose();
    let snapshot = machine.snapshot();

    assert_eq2!(machine.next_deadline(), None);
    assert!(!machine.ingest_lookup(token, Ok(vec!["late".to_string()].into())));
    assert!(machine.fire_due_timers(t0 + ms(5_000)).is_empty());
    assert!(machine.apply(SearchBarEvent::TextChanged("x".into()), t0).is_empty());
    assert!(machine.mount().is_empty());
    assert_eq2!(machine.snapshot(), snapshot);
}

#[test]
fn failure_is_generic_and_cleared_by_next_keystroke() {
    let t0 = Instant::now();
    let mut machine = async_machine();

    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0);
    let token = spawned_token(&machine.fire_due_timers(t0 + ms(300))).unwrap();
    machine.ingest_lookup(token, Err(miette::miette!("connection refused: 10.0.0.7")));

    let snapshot = machine.snapshot();
    assert_eq2!(snapshot.error.as_deref(), Some(GENERIC_LOOKUP_FAILURE_MSG));
    assert!(snapshot.results.is_empty());
    assert!(snapshot.is_open);
    assert!(!snapshot.is_loading);

    machine.apply(SearchBarEvent::TextChanged("abc".into()), t0 + ms(400));
    assert_eq2!(machine.snapshot().error, None);

    // Back to the query that failed: it is searched again, not shown as empty.
    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0 + ms(450));
    let effects = machine.fire_due_timers(t0 + ms(5_000));
    assert!(spawned_token(&effects).is_some());
    assert!(machine.snapshot().is_loading);
}

#[test]
fn keystroke_with_unchanged_text_retries_failed_search() {
    let t0 = Instant::now();
    let mut machine = async_machine();

    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0);
    let token = spawned_token(&machine.fire_due_timers(t0 + ms(300))).unwrap();
    machine.ingest_lookup(token, Err(miette::miette!("timeout")));

    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0 + ms(400));
    assert!(machine.fire_due_timers(t0 + ms(699)).is_empty());
    let retry = spawned_token(&machine.fire_due_timers(t0 + ms(700))).unwrap();
    assert!(retry != token);

    machine.ingest_lookup(retry, Ok(LookupResponse::Items(vec!["Abby".into()])));
    let snapshot = machine.snapshot();
    assert_eq2!(snapshot.error, None);
    assert_eq2!(snapshot.results, vec!["Abby".to_string()]);
}

#[test]
fn async_lookup_panicking_before_its_future_is_a_failure() {
    let t0 = Instant::now();
    let options = SearchBarOptions::new()
        .min_chars(1)
        .lookup(Lookup::from_async(|query: String| {
            assert!(query != "ab", "lookup rejected {query}");
            async move { Ok::<_, miette::Report>(vec![query]) }
        }));
    let mut machine = SearchBarMachine::<String>::new(&options).unwrap();

    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0);
    let effects = machine.fire_due_timers(t0 + ms(300));

    assert!(spawned_token(&effects).is_none());
    let snapshot = machine.snapshot();
    assert_eq2!(snapshot.error.as_deref(), Some(GENERIC_LOOKUP_FAILURE_MSG));
    assert!(!snapshot.is_loading);
}

#[test]
fn non_empty_success_opens_with_no_active_item() {
    let t0 = Instant::now();
    let mut machine = async_machine();

    machine.apply(SearchBarEvent::SetValue("jo".into()), t0);
    assert!(!machine.is_open());
    let token = spawned_token(&machine.fire_due_timers(t0 + ms(300))).unwrap();
    machine.ingest_lookup(token, Ok(LookupResponse::Items(vec!["John".into()])));

    assert!(machine.is_open());
    assert_eq2!(machine.active_index(), None);
}

#[test]
fn nothing_response_normalizes_to_empty() {
    let t0 = Instant::now();
    let mut machine = async_machine();

    machine.apply(SearchBarEvent::TextChanged("jo".into()), t0);
    let token = spawned_token(&machine.fire_due_timers(t0 + ms(300))).unwrap();
    assert!(machine.ingest_lookup(token, Ok(LookupResponse::Nothing)));

    let snapshot = machine.snapshot();
    assert!(snapshot.results.is_empty());
    assert_eq2!(snapshot.error, None);
}

#[test]
fn controlled_mode_reports_but_does_not_own_query() {
    let t0 = Instant::now();
    let options = SearchBarOptions::new().value("jo").results(names());
    let mut machine = SearchBarMachine::<String>::new(&options).unwrap();

    let effects = machine.apply(SearchBarEvent::TextChanged("joh".into()), t0);

    assert!(matches!(
        effects.as_slice(),
        [SearchBarEffect::QueryChanged(text)] if text == "joh"
    ));
    assert_eq2!(machine.query(), "jo");

    machine.apply(SearchBarEvent::SetValue("joh".into()), t0);
    assert_eq2!(machine.query(), "joh");
}

#[test]
fn uncontrolled_mode_owns_query() {
    let t0 = Instant::now();
    let options = SearchBarOptions::<String>::new().initial_value("a");
    let mut machine = SearchBarMachine::new(&options).unwrap();
    assert_eq2!(machine.query(), "a");

    machine.apply(SearchBarEvent::TextChanged("ab".into()), t0);

    assert_eq2!(machine.query(), "ab");
}

#[test]
fn mount_searches_starting_query_immediately() {
    let options = SearchBarOptions::new()
        .initial_value("cy")
        .lookup(Lookup::from_sync(|query: &str| {
            Ok(names()
                .into_iter()
                .filter(|it| it.eq_ignore_ascii_case(query))
                .collect::<Vec<String>>())
        }));
    let mut machine = SearchBarMachine::new(&options).unwrap();

    let effects = machine.mount();

    assert!(effects.is_empty());
    assert_eq2!(machine.results(), &["Cy".to_string()]);
    assert!(machine.is_open());
}

#[test]
fn set_results_replaces_list_and_resets_active_index() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);
    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowUp), t0);
    assert_eq2!(machine.active_index(), Some(2));

    machine.apply(SearchBarEvent::SetResults(Some(vec!["Dee".into()])), t0);

    assert_eq2!(machine.results(), &["Dee".to_string()]);
    assert_eq2!(machine.active_index(), None);
}

#[test]
fn injected_results_take_precedence_over_fetched() {
    let t0 = Instant::now();
    let (mut machine, calls) = recording_machine(1);
    machine.apply(SearchBarEvent::SetResults(Some(vec!["Pinned".into()])), t0);

    machine.apply(SearchBarEvent::TextChanged("bo".into()), t0);
    machine.fire_due_timers(t0 + ms(300));

    assert_eq2!(calls.lock().unwrap().len(), 1);
    assert_eq2!(machine.results(), &["Pinned".to_string()]);

    machine.apply(SearchBarEvent::SetResults(None), t0 + ms(400));
    assert_eq2!(machine.results(), &["Bob".to_string()]);
}

#[test]
fn disabled_ignores_interaction() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    open_with_focus(&mut machine, t0);
    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    machine.apply(SearchBarEvent::Blur, t0);

    machine.apply(SearchBarEvent::SetDisabled(true), t0);
    assert!(!machine.is_open());
    assert_eq2!(machine.active_index(), None);
    assert_eq2!(machine.next_deadline(), None);

    let revision = machine.revision();
    for event in [
        SearchBarEvent::TextChanged("x".into()),
        SearchBarEvent::KeyDown(NavigationKey::ArrowDown),
        SearchBarEvent::Focus,
        SearchBarEvent::Blur,
        SearchBarEvent::OptionPointerDown(0),
    ] {
        assert!(machine.apply(event, t0).is_empty());
    }
    assert_eq2!(machine.revision(), revision);

    machine.apply(SearchBarEvent::SetDisabled(false), t0);
    open_with_focus(&mut machine, t0);
}

#[test]
fn revision_only_moves_on_observable_change() {
    let t0 = Instant::now();
    let mut machine = injected_machine();
    let start = machine.revision();

    // Closed list, nothing to navigate.
    machine.apply(SearchBarEvent::KeyDown(NavigationKey::ArrowDown), t0);
    assert_eq2!(machine.revision(), start);

    machine.apply(SearchBarEvent::Focus, t0);
    assert!(machine.revision() > start);
}

#[test]
fn next_deadline_is_the_earliest_timer() {
    let t0 = Instant::now();
    let mut machine = injected_machine();

    machine.apply(SearchBarEvent::TextChanged("a".into()), t0);
    machine.apply(SearchBarEvent::Blur, t0 + ms(10));

    assert_eq2!(machine.next_deadline(), Some(t0 + ms(110)));
}

#[test]
fn invalid_config_is_rejected() {
    let options = SearchBarOptions::<String>::new().listbox_id("");
    assert!(SearchBarMachine::new(&options).is_err());
}
