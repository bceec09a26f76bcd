use super::SearchResolver;
use crate::errors::EngineError;
use crate::test_support::{search_result, SearchBackendMock, SearchBehaviour, MEDIA_ID};
use crate::types::SearchQuery;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn resolver(
    remote: &Arc<SearchBackendMock>,
    local: &Arc<SearchBackendMock>,
) -> SearchResolver {
    SearchResolver::new(Some(remote.clone()), local.clone())
}

#[actix_rt::test]
async fn test_remote_results_skip_the_local_extractor() {
    let remote = Arc::new(SearchBackendMock::new(
        "api",
        SearchBehaviour::Results(vec![search_result("aaaaaaaaaaa", "Children")]),
    ));
    let local = Arc::new(SearchBackendMock::new(
        "yt-dlp",
        SearchBehaviour::Results(vec![search_result("bbbbbbbbbbb", "Fable")]),
    ));

    let results = resolver(&remote, &local)
        .search("robert miles children", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results, vec![search_result("aaaaaaaaaaa", "Children")]);
    assert_eq!(remote.calls(), 1);
    assert_eq!(local.calls(), 0);
}

#[actix_rt::test]
async fn test_empty_remote_results_fall_back_once() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Results(vec![])));
    let local = Arc::new(SearchBackendMock::new(
        "yt-dlp",
        SearchBehaviour::Results(vec![search_result("bbbbbbbbbbb", "Fable")]),
    ));

    let results = resolver(&remote, &local)
        .search("robert miles fable", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results, vec![search_result("bbbbbbbbbbb", "Fable")]);
    assert_eq!(local.calls(), 1);
}

#[actix_rt::test]
async fn test_remote_failure_falls_back_once() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Fail));
    let local = Arc::new(SearchBackendMock::new(
        "yt-dlp",
        SearchBehaviour::Results(vec![search_result("bbbbbbbbbbb", "Fable")]),
    ));

    let results = resolver(&remote, &local)
        .search("robert miles fable", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(remote.calls(), 1);
    assert_eq!(local.calls(), 1);
}

#[actix_rt::test]
async fn test_unconfigured_remote_goes_straight_to_local() {
    let local = Arc::new(SearchBackendMock::new(
        "yt-dlp",
        SearchBehaviour::Results(vec![search_result("bbbbbbbbbbb", "Fable")]),
    ));

    let results = SearchResolver::new(None, local.clone())
        .search("fable", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(local.calls(), 1);
}

#[actix_rt::test]
async fn test_both_backends_empty_is_not_found() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Results(vec![])));
    let local = Arc::new(SearchBackendMock::new("yt-dlp", SearchBehaviour::Results(vec![])));

    let result = resolver(&remote, &local)
        .search("nothing matches this", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(EngineError::NotFound(_))));
}

#[actix_rt::test]
async fn test_both_backends_failing_surfaces_the_local_error() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Fail));
    let local = Arc::new(SearchBackendMock::new("yt-dlp", SearchBehaviour::Fail));

    let result = resolver(&remote, &local)
        .search("anything", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(EngineError::BackendUnavailable(_))));
}

#[actix_rt::test]
async fn test_empty_query_is_invalid_input() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Results(vec![])));
    let local = Arc::new(SearchBackendMock::new("yt-dlp", SearchBehaviour::Results(vec![])));

    let result = resolver(&remote, &local)
        .search("   ", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    assert_eq!(remote.calls(), 0);
    assert_eq!(local.calls(), 0);
}

#[actix_rt::test]
async fn test_results_are_bounded() {
    let many = (0..8)
        .map(|i| search_result(&format!("id{:09}", i), "Track"))
        .collect::<Vec<_>>();
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Results(many)));
    let local = Arc::new(SearchBackendMock::new("yt-dlp", SearchBehaviour::Results(vec![])));

    let results = resolver(&remote, &local)
        .search("track", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 5);
    assert_eq!(results[0].id, "id000000000");
}

#[actix_rt::test]
async fn test_links_reach_backends_in_canonical_form() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Results(vec![])));
    let local = Arc::new(SearchBackendMock::new(
        "yt-dlp",
        SearchBehaviour::Results(vec![search_result(MEDIA_ID, "Song")]),
    ));

    resolver(&remote, &local)
        .search(&format!("https://youtu.be/{}?si=x", MEDIA_ID), &CancellationToken::new())
        .await
        .unwrap();

    let queries = local.queries();
    assert_eq!(queries.len(), 1);
    match &queries[0] {
        SearchQuery::Link(link) => assert_eq!(
            link.canonical_url,
            format!("https://www.youtube.com/watch?v={}", MEDIA_ID)
        ),
        SearchQuery::Text(text) => panic!("expected a link query, got text {:?}", text),
    }
}

#[actix_rt::test]
async fn test_cancelled_remote_search_does_not_fall_back() {
    let remote = Arc::new(SearchBackendMock::new("api", SearchBehaviour::Cancelled));
    let local = Arc::new(SearchBackendMock::new(
        "yt-dlp",
        SearchBehaviour::Results(vec![search_result("bbbbbbbbbbb", "Fable")]),
    ));

    let result = resolver(&remote, &local)
        .search("robert miles fable", &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(EngineError::Cancelled)));
    assert_eq!(remote.calls(), 1);
    assert_eq!(local.calls(), 0);
}
