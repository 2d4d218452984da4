use findmybike_lib::types::{Aspect, Frame, PostingId};
use findmybike_lib::{
    Client, CorrectionForm, CorrectionStatus, FeedController, FeedState, PostingQuery, QueryState,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn posting(id: u32, frame: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Fahrrad {}", id),
        "url": format!("https://ads.example.com/{}", id),
        "img_url": format!("https://ads.example.com/{}.jpg", id),
        "location": "Berlin",
        "date": "2022-04-02T12:00:50",
        "prediction": {"bike": "bike", "frame": frame, "color": "black"}
    })
}

fn page(ids: std::ops::Range<u32>, frame: &str) -> ResponseTemplate {
    let data: Vec<serde_json::Value> = ids.map(|id| posting(id, frame)).collect();
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

fn client(server: &MockServer) -> Client {
    Client::new(&server.uri(), "secret").unwrap()
}

#[tokio::test]
async fn search_then_load_more_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("skip", "3"))
        .respond_with(page(3..6, "trapeze"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("skip", "6"))
        .respond_with(page(6..7, "trapeze"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("frame", "trapeze"))
        .respond_with(page(0..3, "trapeze"))
        .mount(&server)
        .await;

    let mut query = QueryState::default();
    query.set_field(Aspect::Bike, "").unwrap();
    query.set_field(Aspect::Frame, "trapeze").unwrap();

    let mut controller = FeedController::new(client(&server), 3);
    assert_eq!(controller.search(&query.to_query()).await.unwrap(), 3);
    assert_eq!(controller.load_more().await.unwrap(), 3);
    assert_eq!(controller.load_more().await.unwrap(), 1);
    assert!(controller.feed().is_exhausted());
    assert_eq!(controller.load_more().await.unwrap(), 0);

    let feed = controller.feed();
    assert_eq!(feed.len(), 7);
    assert_eq!(feed.postings()[6].id, PostingId::from("6"));
    assert_eq!(feed.state(), FeedState::Idle);

    let requests = server.received_requests().await.unwrap();
    let queries: Vec<String> = requests
        .iter()
        .map(|r| r.url.query().unwrap_or("").to_string())
        .collect();
    assert_eq!(
        queries,
        vec![
            "frame=trapeze&limit=3",
            "frame=trapeze&skip=3&limit=3",
            "frame=trapeze&skip=6&limit=3",
        ]
    );
}

#[tokio::test]
async fn new_search_replaces_previous_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("frame", "diamond"))
        .respond_with(page(100..102, "diamond"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posting"))
        .respond_with(page(0..5, "trapeze"))
        .mount(&server)
        .await;

    let mut controller = FeedController::new(client(&server), 5);
    controller.search(&PostingQuery::default()).await.unwrap();
    controller.load_more().await.unwrap();
    assert_eq!(controller.feed().len(), 5);

    let diamond = PostingQuery::default().with_frame(Frame::Diamond);
    assert_eq!(controller.search(&diamond).await.unwrap(), 2);
    let ids: Vec<&str> = controller
        .feed()
        .postings()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["100", "101"]);
    assert!(
        controller
            .feed()
            .aspect_matches(&controller.feed().postings()[0].prediction)
            .frame
    );
}

#[tokio::test]
async fn failed_page_is_reported_and_list_kept() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("skip", "2"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posting"))
        .respond_with(page(0..2, "y"))
        .mount(&server)
        .await;

    let mut controller = FeedController::new(client(&server), 2);
    controller.search(&PostingQuery::default()).await.unwrap();
    let err = controller.load_more().await.unwrap_err();
    assert!(err.is_request_failure());
    assert_eq!(controller.feed().len(), 2);
    assert!(controller.feed().last_error().is_some());
    assert!(controller.feed().can_load_more());
}

#[tokio::test]
async fn failed_search_keeps_paging_previous_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("frame", "trapeze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posting"))
        .and(query_param("skip", "2"))
        .respond_with(page(2..4, "diamond"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posting"))
        .respond_with(page(0..2, "diamond"))
        .mount(&server)
        .await;

    let diamond = PostingQuery::default().with_frame(Frame::Diamond);
    let trapeze = PostingQuery::default().with_frame(Frame::Trapeze);
    let mut controller = FeedController::new(client(&server), 2);
    controller.search(&diamond).await.unwrap();
    assert!(controller.search(&trapeze).await.is_err());
    assert_eq!(controller.feed().active_query(), Some(&diamond));

    assert_eq!(controller.load_more().await.unwrap(), 2);
    assert!(controller
        .feed()
        .postings()
        .iter()
        .all(|p| p.prediction.frame == Frame::Diamond));

    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.url.query(), Some("frame=diamond&skip=2&limit=2"));
}

#[tokio::test]
async fn correction_form_submits_through_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/correction"))
        .and(body_json(json!({
            "posting_id": "42",
            "correction": {"bike": "cargo", "frame": "x", "color": "blue"}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut form = CorrectionForm::new(PostingId::from(42));
    form.set_field(Aspect::Bike, "cargo").unwrap();
    form.set_field(Aspect::Frame, "X Frame").unwrap();
    form.set_field(Aspect::Color, "Blue").unwrap();
    form.submit(&client).await.unwrap();
    assert_eq!(form.status(), &CorrectionStatus::Submitted);
}

#[tokio::test]
async fn correction_failure_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/correction"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(r#"{"detail":"Posting with ID 9 not found"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut form = CorrectionForm::new(PostingId::from("9"));
    form.set_field(Aspect::Bike, "bike").unwrap();
    form.set_field(Aspect::Frame, "diamond").unwrap();
    form.set_field(Aspect::Color, "red").unwrap();

    assert!(form.submit(&client).await.is_err());
    assert!(matches!(form.status(), CorrectionStatus::Failed(msg) if msg.contains("500")));
    assert!(form.is_open());
}

#[tokio::test]
async fn incomplete_correction_is_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/correction"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut form = CorrectionForm::new(PostingId::from("1"));
    form.set_field(Aspect::Bike, "bike").unwrap();
    assert!(!form.can_submit());
    assert!(form.submit(&client).await.is_err());
    assert_eq!(form.status(), &CorrectionStatus::Editing);
}
