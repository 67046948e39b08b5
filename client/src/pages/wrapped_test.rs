use super::*;
use wrapped::ArtistSummary;

#[test]
fn loading_shows_waiting_message() {
    assert_eq!(status_message(&LoadState::Loading), Some("Loading your wrapped..."));
}

#[test]
fn redirecting_shows_redirect_message() {
    assert_eq!(status_message(&LoadState::Redirecting), Some("Redirecting to login..."));
}

#[test]
fn loaded_renders_list_even_when_empty() {
    assert_eq!(status_message(&LoadState::Loaded(Vec::new())), None);
    assert!(artist_labels(&LoadState::Loaded(Vec::new())).is_empty());
}

#[test]
fn labels_keep_order_and_duplicates() {
    let state = LoadState::Loaded(vec![
        ArtistSummary::new("Taylor Swift"),
        ArtistSummary::new("Drake"),
        ArtistSummary::new("Drake"),
    ]);
    assert_eq!(artist_labels(&state), ["Taylor Swift", "Drake", "Drake"]);
}

#[test]
fn no_labels_while_redirecting() {
    assert!(artist_labels(&LoadState::Redirecting).is_empty());
}
