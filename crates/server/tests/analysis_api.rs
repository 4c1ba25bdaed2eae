//! Analysis, insights, ingestion and generation endpoint tests.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{fixtures, test_config, TestFixture};
use socdesk_core::{TicketFilter, TicketStore};

fn tickets_json(tickets: Vec<socdesk_core::TicketRecord>) -> Value {
    serde_json::to_value(tickets).unwrap()
}

#[tokio::test]
async fn test_analysis_over_store() {
    let fixture = TestFixture::new();
    for ticket in fixtures::mixed_priority_scenario() {
        fixture.store.add(ticket).unwrap();
    }

    let response = fixture.get("/api/v1/analysis").await;
    assert_status!(response, StatusCode::OK);

    let body = &response.body;
    assert_eq!(body["ticket_count"], 3);
    assert!(body["run_id"].is_string());
    assert!(body["generated_at"].is_string());

    assert_eq!(body["summary"]["status"], "ok");
    assert_eq!(body["summary"]["result"]["total"], 3);
    assert_eq!(body["summary"]["result"]["high_priority"], 2);
    assert_eq!(body["summary"]["result"]["most_common_status"], "Done");

    assert_eq!(body["high_risk"]["status"], "ok");
    let keys: Vec<_> = body["high_risk"]["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["SOC-1", "SOC-3"]);

    assert_eq!(body["mitigation"]["status"], "ok");
    assert!(body["mitigation"]["result"]["flagged_ips"].is_null());
}

#[tokio::test]
async fn test_analysis_status_filter() {
    let fixture = TestFixture::new();
    for ticket in fixtures::mixed_priority_scenario() {
        fixture.store.add(ticket).unwrap();
    }

    let response = fixture.get("/api/v1/analysis?status=Done").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["ticket_count"], 2);
    assert_eq!(response.body["summary"]["result"]["high_priority"], 1);
}

#[tokio::test]
async fn test_analysis_of_posted_tickets() {
    let fixture = TestFixture::new();

    let response = fixture
        .post(
            "/api/v1/analysis",
            json!({ "tickets": tickets_json(fixtures::repeated_ip_scenario()) }),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    let mitigation = &response.body["mitigation"]["result"];
    assert_eq!(
        mitigation["flagged_ips"],
        json!([{ "ip": "10.0.0.5", "count": 2 }])
    );
    assert_eq!(
        mitigation["recommendation"],
        "Block repeated IP addresses at firewall."
    );

    // Posted tickets are not stored.
    assert_eq!(fixture.store.count(&TicketFilter::new()).unwrap(), 0);
}

#[tokio::test]
async fn test_analysis_of_empty_store() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/analysis").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["ticket_count"], 0);
    assert_eq!(
        response.body["summary"]["result"]["narrative"],
        "No tickets available."
    );
    assert_eq!(response.body["high_risk"]["result"], json!([]));
}

#[tokio::test]
async fn test_failing_agent_does_not_block_others() {
    let fixture = TestFixture::new();

    // Neither priority nor status: summary cannot run, the others still do.
    let response = fixture
        .post(
            "/api/v1/analysis",
            json!({ "tickets": [
                { "key": "SOC-1", "summary": "bare", "description": "from 10.1.1.1" },
                { "key": "SOC-2", "summary": "bare", "description": "from 10.1.1.1" }
            ]}),
        )
        .await;
    assert_status!(response, StatusCode::OK);

    assert_eq!(response.body["summary"]["status"], "failed");
    assert_eq!(response.body["summary"]["agent"], "summary");
    assert!(response.body["summary"]["error"].is_string());
    assert_eq!(response.body["high_risk"]["status"], "ok");
    assert_eq!(response.body["mitigation"]["status"], "ok");
    assert_eq!(
        response.body["mitigation"]["result"]["flagged_ips"][0]["ip"],
        "10.1.1.1"
    );
}

#[tokio::test]
async fn test_concurrent_mode_gives_same_results() {
    let mut config = test_config();
    config.analysis.concurrent = true;
    let concurrent = TestFixture::with_config(config);
    let sequential = TestFixture::new();

    for fixture in [&concurrent, &sequential] {
        for ticket in fixtures::repeated_ip_scenario() {
            fixture.store.add(ticket).unwrap();
        }
    }

    let a = concurrent.get("/api/v1/analysis").await.body;
    let b = sequential.get("/api/v1/analysis").await.body;
    for slot in ["summary", "high_risk", "mitigation"] {
        assert_eq!(a[slot], b[slot], "slot {} differs", slot);
    }
}

#[tokio::test]
async fn test_insights() {
    let fixture = TestFixture::new();
    for i in 1..=4 {
        fixture
            .store
            .add(fixtures::ticket(&format!("SOC-{}", i), "High", "Done"))
            .unwrap();
    }
    fixture
        .store
        .add(fixtures::ticket("SOC-5", "Low", "To Do"))
        .unwrap();

    let response = fixture.get("/api/v1/insights").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["total"], 5);
    assert_eq!(
        response.body["priority_distribution"],
        json!([{ "value": "High", "count": 4 }, { "value": "Low", "count": 1 }])
    );
    assert_eq!(
        response.body["recommendations"],
        json!(["High volume of High priority tickets. Consider incident escalation review."])
    );
}

#[tokio::test]
async fn test_ingest_jira_payload() {
    let fixture = TestFixture::new();
    fixture
        .store
        .add(fixtures::ticket("SOC-1", "High", "Done"))
        .unwrap();

    let payload = json!({
        "issues": [
            { "key": "SOC-1", "fields": { "summary": "dup" } },
            { "key": "SOC-2", "fields": {
                "summary": "SOC Event Alert",
                "description": { "type": "doc", "content": [
                    { "type": "paragraph", "content": [{ "type": "text", "text": "SRC_IP: 45.33.21.9" }] }
                ]},
                "priority": { "name": "Highest" },
                "status": { "name": "In Progress" },
                "labels": ["alert"]
            }},
            { "key": "SOC-3", "fields": {} }
        ]
    });

    let response = fixture.post("/api/v1/ingest/jira", payload).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["added"], json!(["SOC-2", "SOC-3"]));
    assert_eq!(response.body["rejected"][0]["key"], "SOC-1");
    assert_eq!(response.body["rejected"][0]["kind"], "duplicate");

    let stored = fixture.store.get("SOC-2").unwrap().unwrap();
    assert_eq!(stored.description.as_deref(), Some("SRC_IP: 45.33.21.9"));

    let defaults = fixture.store.get("SOC-3").unwrap().unwrap();
    assert_eq!(defaults.priority.as_deref(), Some("Medium"));
    assert_eq!(defaults.status.as_deref(), Some("To Do"));
}

#[tokio::test]
async fn test_ingest_replace_clears_first() {
    let fixture = TestFixture::new();
    for ticket in fixtures::batch(3) {
        fixture.store.add(ticket).unwrap();
    }

    let payload = json!({ "issues": [{ "key": "SOC-1", "fields": { "summary": "fresh" } }] });
    let response = fixture
        .post("/api/v1/ingest/jira?replace=true", payload)
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["added"], json!(["SOC-1"]));

    let all = fixture.store.list(&TicketFilter::new()).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].summary, "fresh");
}

#[tokio::test]
async fn test_generate_default_count() {
    let fixture = TestFixture::new();

    let response = fixture.post_empty("/api/v1/generate").await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["added"], 20);
    assert_eq!(response.body["keys"][0], "SOC-1");
    assert_eq!(response.body["keys"][19], "SOC-20");
    assert_eq!(fixture.store.count(&TicketFilter::new()).unwrap(), 20);
}

#[tokio::test]
async fn test_generate_keys_continue_across_calls() {
    let fixture = TestFixture::new();

    let first = fixture
        .post("/api/v1/generate", json!({ "count": 2 }))
        .await;
    let second = fixture
        .post("/api/v1/generate", json!({ "count": 2 }))
        .await;

    assert_eq!(first.body["keys"], json!(["SOC-1", "SOC-2"]));
    assert_eq!(second.body["keys"], json!(["SOC-3", "SOC-4"]));
}

#[tokio::test]
async fn test_generate_count_bounds() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/generate", json!({ "count": 0 }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);

    let response = fixture
        .post("/api/v1/generate", json!({ "count": 501 }))
        .await;
    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_generated_tickets_feed_mitigation() {
    let fixture = TestFixture::new();
    fixture
        .post("/api/v1/generate", json!({ "count": 200 }))
        .await;

    let response = fixture.get("/api/v1/analysis").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["ticket_count"], 200);

    let flagged = response.body["mitigation"]["result"]["flagged_ips"]
        .as_array()
        .unwrap();
    assert!(flagged.iter().any(|f| {
        matches!(
            f["ip"].as_str(),
            Some("185.243.115.84" | "45.33.21.9" | "103.77.192.11")
        )
    }));
}
