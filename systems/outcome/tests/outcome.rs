use std::time::Duration;

use gift_hunt_core::{DisplayWindow, PlaceTag};
use gift_hunt_system_outcome::{MediaRequest, OutcomeMedia, OutcomePresenter, PresentationTiming};
use gift_hunt_world::{judge, GameState};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn run_until_settled(presenter: &mut OutcomePresenter) -> Vec<(Duration, MediaRequest)> {
    let mut timeline = Vec::new();
    let mut out = Vec::new();
    for _ in 0..100 {
        presenter.advance(ms(100), &mut out);
        for request in out.drain(..) {
            timeline.push((presenter.elapsed(), request));
        }
        if presenter.is_settled() {
            break;
        }
    }
    timeline
}

#[test]
fn win_shows_success_then_returns_to_scene() {
    let (state, judgement) = judge(PlaceTag::Tree, PlaceTag::Tree, &GameState::default());
    let mut presenter = OutcomePresenter::default();
    presenter.present(&judgement, &state);

    assert_eq!(
        run_until_settled(&mut presenter),
        vec![
            (
                ms(1_000),
                MediaRequest::Show {
                    asset: OutcomeMedia::default().success,
                    window: DisplayWindow::Short,
                }
            ),
            (ms(6_000), MediaRequest::Hide),
        ]
    );
    assert!(!presenter.is_media_visible());
}

#[test]
fn retry_hides_failure_after_the_short_hold() {
    let (state, judgement) = judge(PlaceTag::Sofa, PlaceTag::Tree, &GameState::default());
    let mut presenter = OutcomePresenter::default();
    presenter.present(&judgement, &state);

    let timeline = run_until_settled(&mut presenter);
    assert_eq!(timeline.len(), 2);
    assert_eq!(
        timeline[0],
        (
            ms(1_000),
            MediaRequest::Show {
                asset: OutcomeMedia::default().failure,
                window: DisplayWindow::Short,
            }
        )
    );
    assert_eq!(timeline[1], (ms(5_000), MediaRequest::Hide));
}

#[test]
fn final_loss_holds_failure_longer() {
    let mut state = GameState::default();
    let mut judgement = None;
    for _ in 0..4 {
        let (next, judged) = judge(PlaceTag::Ground, PlaceTag::Window, &state);
        state = next;
        judgement = Some(judged);
    }
    let judgement = judgement.expect("four attempts were judged");

    let mut presenter = OutcomePresenter::default();
    presenter.present(&judgement, &state);

    let timeline = run_until_settled(&mut presenter);
    assert_eq!(
        timeline.first().map(|(_, request)| request.clone()),
        Some(MediaRequest::Show {
            asset: OutcomeMedia::default().failure,
            window: DisplayWindow::Extended,
        })
    );
    assert_eq!(timeline.last(), Some(&(ms(6_000), MediaRequest::Hide)));
}

#[test]
fn media_is_never_requested_synchronously_with_judging() {
    let (state, judgement) = judge(PlaceTag::Sofa, PlaceTag::Sofa, &GameState::default());
    let mut presenter = OutcomePresenter::default();
    presenter.present(&judgement, &state);

    let mut out = Vec::new();
    presenter.advance(Duration::ZERO, &mut out);
    assert!(out.is_empty());
    assert!(!presenter.is_media_visible());
}

#[test]
fn visibility_follows_the_timeline() {
    let (state, judgement) = judge(PlaceTag::Sofa, PlaceTag::Tree, &GameState::default());
    let mut presenter = OutcomePresenter::new(
        PresentationTiming {
            reveal_delay: ms(10),
            won_hold: ms(10),
            retry_hold: ms(20),
            final_hold: ms(30),
        },
        OutcomeMedia::default(),
    );
    presenter.present(&judgement, &state);

    let mut out = Vec::new();
    presenter.advance(ms(10), &mut out);
    assert!(presenter.is_media_visible());
    presenter.advance(ms(19), &mut out);
    assert!(presenter.is_media_visible());
    presenter.advance(ms(1), &mut out);
    assert!(!presenter.is_media_visible());
    assert!(presenter.is_settled());
    assert_eq!(out.len(), 2);
}

#[test]
fn later_judgements_append_to_the_timeline() {
    let (first_state, first) = judge(PlaceTag::Sofa, PlaceTag::Tree, &GameState::default());
    let (second_state, second) = judge(PlaceTag::Tree, PlaceTag::Tree, &first_state);

    let mut presenter = OutcomePresenter::default();
    presenter.present(&first, &first_state);
    let mut out = Vec::new();
    presenter.advance(ms(4_500), &mut out);
    presenter.present(&second, &second_state);

    let timeline = run_until_settled(&mut presenter);
    let hides = timeline
        .iter()
        .filter(|(_, request)| *request == MediaRequest::Hide)
        .count();
    assert_eq!(hides, 2, "every presented outcome ends with a hide");
    assert_eq!(timeline.last(), Some(&(ms(10_500), MediaRequest::Hide)));
}

#[test]
fn overlapping_misses_keep_media_until_the_last_hold_ends() {
    let (first_state, first) = judge(PlaceTag::Sofa, PlaceTag::Tree, &GameState::default());
    let (second_state, second) = judge(PlaceTag::Window, PlaceTag::Tree, &first_state);

    let mut presenter = OutcomePresenter::default();
    presenter.present(&first, &first_state);
    let mut out = Vec::new();
    presenter.advance(ms(500), &mut out);
    presenter.present(&second, &second_state);

    presenter.advance(ms(4_500), &mut out);
    assert!(
        presenter.is_media_visible(),
        "the second miss is still within its hold"
    );
    assert!(out
        .iter()
        .all(|request| matches!(request, MediaRequest::Show { .. })));
    assert_eq!(out.len(), 2);

    presenter.advance(ms(500), &mut out);
    assert!(!presenter.is_media_visible());
    assert_eq!(out.last(), Some(&MediaRequest::Hide));
    assert_eq!(
        out.iter()
            .filter(|request| **request == MediaRequest::Hide)
            .count(),
        1
    );
    assert!(presenter.is_settled());
}
