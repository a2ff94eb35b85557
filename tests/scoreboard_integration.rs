//! Integration tests for the scoreboard pipeline using fixture files.

use ioi_scoreboard::commands::ShowCommand;
use ioi_scoreboard::config::{Config, OutputFormat};
use ioi_scoreboard::scoreboard::{parse_scoreboard, ScoreboardClient, TableSpec};
use ioi_scoreboard::{build_snapshot, FocusWindow, Pipeline, Rank};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY_FIXTURE: &str = include_str!("fixtures/scoreboard_day.html");
const GLOBAL_FIXTURE: &str = include_str!("fixtures/scoreboard_global.html");

#[test]
fn test_parse_day_fixture() {
    let table = parse_scoreboard(DAY_FIXTURE, &TableSpec::default()).unwrap();

    assert_eq!(table.len(), 12);
    assert_eq!(table.columns.len(), 9);
    assert_eq!(table.columns[7], "Unnamed_7");
    assert_eq!(table.cell(0, "ID"), Some("IOI01"));
    assert_eq!(table.cell(10, "Day 2"), Some("DNS"));
}

#[test]
fn test_day_fixture_snapshot() {
    let snapshot = build_snapshot(DAY_FIXTURE, &Config::default()).unwrap();

    // two organizer rows and one "DNS" row are dropped
    assert_eq!(snapshot.records.len(), 9);
    assert!(snapshot.records.iter().all(|r| r.country_code != "IOI"));

    let countries: Vec<(&str, f64, usize)> = snapshot
        .ranking
        .iter()
        .map(|c| (c.country.as_str(), c.total_score, c.contestants))
        .collect();
    assert_eq!(
        countries,
        vec![
            ("China", 555.0, 2),
            ("South Korea", 370.0, 2),
            ("Pakistan", 275.0, 2),
            ("United States", 175.0, 1),
            ("India", 90.0, 1),
            ("XYZ", 40.0, 1),
        ]
    );

    let FocusWindow::Ranked(window) = &snapshot.window else {
        panic!("Pakistan should be ranked");
    };
    assert_eq!(window.rank, 3);
    assert_eq!(window.entries.len(), 6);
}

#[test]
fn test_day_fixture_standings() {
    let snapshot = build_snapshot(DAY_FIXTURE, &Config::default()).unwrap();

    let standings = &snapshot.standings;
    assert_eq!(standings.len(), 2);

    assert_eq!(standings[0].name, "Sana Ali");
    assert_eq!(standings[0].overall_rank, Rank::Known(5));
    assert_eq!(standings[0].competitor_rank, Rank::Known(4));
    assert_eq!(standings[0].total_score, Some(180.0));
    assert_eq!(standings[0].problem_scores[1].score, Some(45.5));

    assert_eq!(standings[1].name, "Omar Shah");
    assert_eq!(standings[1].overall_rank, Rank::Known(8));
    assert_eq!(standings[1].competitor_rank, Rank::Known(7));
    assert_eq!(standings[1].problem_scores[2].score, None);
}

#[test]
fn test_dropped_contestant_keeps_overall_rank() {
    let config = Config {
        focus_contestants: vec!["PAK03".into(), "PAK01".into()],
        ..Config::default()
    };
    let snapshot = build_snapshot(DAY_FIXTURE, &config).unwrap();

    let dropped = &snapshot.standings[0];
    assert_eq!(dropped.id, "PAK03");
    assert_eq!(dropped.country, "Pakistan");
    assert_eq!(dropped.overall_rank, Rank::Known(11));
    assert_eq!(dropped.competitor_rank, Rank::Unknown);
    assert_eq!(dropped.total_score, None);

    assert_eq!(snapshot.standings[1].id, "PAK01");
}

#[test]
fn test_global_fixture_ties_break_by_name() {
    let config = Config { focus_country: "Romania".into(), ..Config::default() };
    let snapshot = build_snapshot(GLOBAL_FIXTURE, &config).unwrap();

    assert_eq!(snapshot.records[0].full_name(), "Andrei Popescu");
    assert_eq!(snapshot.ranking.len(), 2);
    assert_eq!(snapshot.ranking[0].country, "Brazil");
    assert_eq!(snapshot.ranking[0].rank, 1);
    assert_eq!(snapshot.ranking[1].country, "Romania");
    assert_eq!(snapshot.ranking[1].total_score, 450.0);

    // ROU02 trails both Brazilian contestants
    let ranks: Vec<Rank> = snapshot.standings.iter().map(|s| s.competitor_rank).collect();
    assert_eq!(ranks, vec![Rank::Known(1), Rank::Known(4)]);
}

#[tokio::test]
async fn test_http_pipeline_against_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DAY_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config { url: format!("{}/", server.uri()), ..Config::default() };
    let client = ScoreboardClient::new(&config).unwrap();
    let pipeline = Pipeline::new(Box::new(client), config);

    // the second refresh is served from the cache
    let first = pipeline.refresh().await;
    let second = pipeline.refresh().await;

    assert_eq!(first.snapshot().unwrap().ranking[0].country, "China");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_show_command_degrades_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let config = Config {
        url: server.uri(),
        format: OutputFormat::Json,
        ..Config::default()
    };
    let output = ShowCommand::new(config).execute().await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["error"]["code"], "fetch_failed");
    assert!(value["error"]["message"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_show_command_markdown_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GLOBAL_FIXTURE))
        .mount(&server)
        .await;

    let config = Config {
        url: server.uri(),
        focus_country: "Brazil".into(),
        format: OutputFormat::Markdown,
        ..Config::default()
    };
    let output = ShowCommand::new(config).execute().await.unwrap();

    assert!(output.contains("## Top 2 Countries by Total Score"));
    assert!(output.contains("| 1 | **Brazil** | 450 | 2 |"));
    assert!(output.contains("## Brazil: Problem-wise Scores and Ranks"));
    assert!(output.contains("| Ana Souza | 100 | 100 | 50 | 250 | 4/2 |"));
}
