use chrono::{TimeZone, Utc};
use polynews::digest::{compose, render_newsletter, GroupMap, RenderBlock, ScoredItem};
use polynews::markets::{rank_by_interest, MarketCollector, RawEvent};
use polynews::venue::{parse_events_body, MockEventSource};
use polynews::PolynewsError;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn gamma_page() -> serde_json::Value {
    json!([
        {
            "title": "Who will win the debate?",
            "ticker": "debate-winner",
            "volume": "200000",
            "volume24hr": "15000",
            "commentCount": 40,
            "featured": false,
            "tags": [{"id": 198, "label": "Breaking News"}],
            "markets": [
                {"groupItemTitle": "Candidate A", "outcomes": "[\"Yes\", \"No\"]",
                 "outcomePrices": "[\"0.41\", \"0.59\"]", "oneDayPriceChange": 0.08},
                {"groupItemTitle": "Candidate B", "outcomes": "[\"Yes\", \"No\"]",
                 "outcomePrices": "[\"0.57\", \"0.43\"]", "oneDayPriceChange": -0.06}
            ]
        },
        {
            "title": "Already decided",
            "volume": 5000,
            "volume24hr": 900,
            "commentCount": 3,
            "featured": true,
            "markets": [{"outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"1\", \"0\"]"}]
        },
        {
            "title": "No money yet",
            "volume": 0,
            "volume24hr": 100,
            "markets": [{"outcomes": "[\"Yes\", \"No\"]", "outcomePrices": "[\"0.5\", \"0.5\"]"}]
        }
    ])
}

#[tokio::test]
async fn test_collect_and_rank_from_api_page() {
    let events: Vec<RawEvent> = parse_events_body(gamma_page()).unwrap();
    let source = Arc::new(MockEventSource::scripted(
        "mock".to_string(),
        vec![Err(PolynewsError::Fetch("503".to_string())), Ok(events)],
    ));
    let collector = MarketCollector::new(source.clone());

    let now = Utc.with_ymd_and_hms(2024, 10, 1, 8, 30, 0).unwrap();
    let markets = collector.collect_from(now, 2, 100, 0).await.unwrap();
    assert_eq!(markets.len(), 3);

    let ranked = rank_by_interest(markets);
    assert_eq!(ranked[0].title_text(), "Who will win the debate?");
    assert_eq!(ranked[0].options[0].name, "Candidate B (Yes is outcome)");

    // avg |Δ| = 0.07; base = 0.07 * 15000 + 40 * 100 * (15000 / 200000) = 1350; tag 198 boost x100
    assert!((ranked[0].interest_score - 135_000.0).abs() < 1e-6);
    assert_eq!(ranked[1].interest_score, 0.0);
    assert_eq!(ranked[2].interest_score, 0.0);

    let queries = source.queries().await;
    assert_eq!(queries.len(), 2);
    assert_eq!(
        queries[1].params()[4],
        ("start_date_max", "2024-09-30T08:30:00Z".to_string())
    );
}

#[tokio::test]
async fn test_mock_sweep_scores_are_finite() {
    let collector = MarketCollector::new(Arc::new(MockEventSource::new("mock".to_string(), 5)));
    let markets = collector.collect(3, 10, 0).await.unwrap();
    assert_eq!(markets.len(), 15);
    assert!(markets.iter().all(|m| m.interest_score.is_finite() && m.interest_score >= 0.0));
    assert!(markets.iter().all(|m| m.options.len() == 1));
}

fn item(id: i64, score: f64, headline: &str) -> ScoredItem {
    ScoredItem {
        id,
        headline: headline.to_string(),
        subheader: format!("Subheader {}", id),
        blurb: format!("Blurb {}", id),
        score,
        ticker: None,
        links: vec![],
        image_url: None,
    }
}

#[test]
fn test_digest_compose_and_render() {
    let items = vec![
        item(10, 9.5, "Debate odds swing 14%"),
        item(11, 3.0, "Senate race steady"),
        item(12, 7.2, "Fed cut now 62.5% likely"),
        item(13, 6.1, "Crypto ETF flows"),
    ];
    let mut groups = GroupMap::new();
    groups.insert("Politics".to_string(), vec![10, 11, 404]);
    groups.insert("Economy".to_string(), vec![12, 10]);

    let plan = compose(&items, &groups);

    let headers: Vec<&str> = plan
        .iter()
        .filter_map(|b| match b {
            RenderBlock::SectionHeader { title } => Some(title.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(headers, vec!["Politics", "Economy", "Other Stories"]);

    let ids: Vec<i64> = plan.iter().filter_map(RenderBlock::item_id).collect();
    assert_eq!(ids, vec![10, 12, 13, 11]);
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), items.len());

    let html = render_newsletter("<h1>$date</h1>$articles", "October 01, 2024", &plan);
    assert!(html.starts_with("<h1>October 01, 2024</h1>"));
    assert!(html.contains("<span class=\"pct\">14%</span>"));
    assert!(html.contains("<span class=\"pct\">62.5%</span>"));
}
