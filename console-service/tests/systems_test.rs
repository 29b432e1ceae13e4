//! Integration tests for the organization selector on the systems listing.
//!
//! The store is unreachable, so only the decisions made before any query
//! are exercised here; hierarchy probes that do reach the store fail closed
//! into 403.

mod common;

use common::{caller_context, get_request, get_request_as, send, test_app};

#[tokio::test]
async fn managing_tiers_must_name_a_target_organization() {
    let app = test_app(vec![], vec![]).await;
    for tier in ["owner", "distributor", "reseller"] {
        let (status, _) = send(
            &app.router,
            get_request_as("/api/systems", &caller_context("usr-1", "org-own", tier)),
        )
        .await;
        assert_eq!(status, 400, "tier={tier}");
    }
}

#[tokio::test]
async fn unreachable_hierarchy_probe_fails_closed_to_forbidden() {
    let app = test_app(vec![], vec![]).await;
    for tier in ["distributor", "reseller"] {
        let (status, _) = send(
            &app.router,
            get_request_as(
                "/api/systems?organization_id=org-unrelated",
                &caller_context("usr-1", "org-own", tier),
            ),
        )
        .await;
        assert_eq!(status, 403, "tier={tier}");
    }
}

#[tokio::test]
async fn unrecognized_tier_is_forbidden() {
    let app = test_app(vec![], vec![]).await;
    let (status, _) = send(
        &app.router,
        get_request_as(
            "/api/systems?organization_id=org-own",
            &caller_context("usr-1", "org-own", "superadmin"),
        ),
    )
    .await;
    assert_eq!(status, 403);
}

#[tokio::test]
async fn missing_caller_context_is_unauthorized() {
    let app = test_app(vec![], vec![]).await;
    let (status, body) = send(&app.router, get_request("/api/systems")).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "unauthorized");
}
