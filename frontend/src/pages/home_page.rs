use common::{query_response::{CountBucket, StatisticsOverview}, users::UserStats};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::md_action_icons::MdSearch;
use dioxus_free_icons::icons::md_file_icons::MdFileUpload;
use futures_util::future::try_join;

use crate::{
    api::{disease_api::statistics_overview, error_text, users_api::user_stats},
    components::{error_boundary::ComponentErrorDisplay, suspend_boundary::LoadingIndicator},
    data_definitions::session_state::{use_session, use_session_token},
    routes::Route,
};


/// Dashboard
#[component]
pub fn HomePage() -> Element {
    rsx! {
        Title { "Autoimmune Atlas - Dashboard" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 20px;
                width: 100%;
                height: 100%;
                padding: 36px 40px;
                background: #F5F6F8;
                box-sizing: border-box;
                overflow: auto;
            ",

            MainTitle {}

            div {
                style: "
                    display:flex;
                    flex-direction: row;
                    gap: 20px;
                    flex-wrap: wrap;
                    align-items: stretch;
                ",
                BrowseCard {}
                ImportCard {}
            }

            DashboardStatistics {}
        }
    }
}

#[component]
fn MainTitle() -> Element {
    rsx! {
        div {
            style: "
                display:flex;
                align-items: center;
                gap: 8px;
                color: #0F172A;
                font-size: 40px;
                font-weight: 500;
                letter-spacing: -0.02em;
            ",
            span { "Autoimmune" }
            span { style: "color:#4F46E5;", "Atlas" }
        }
        div {
            style: "color: #374151; font-size: 20px; line-height: 1.6; max-width: 720px;",
            "Curated links between autoimmune diseases, their autoantibodies, the autoantigens they target and the epitopes involved."
        }
    }
}

#[component]
fn BrowseCard() -> Element {
    rsx! {
        Link {
            to: Route::DiseaseBrowsePage {},
            class: "x-home-card",
            style: "background: linear-gradient(135deg, #2D208A 0%, #5B3DF5 100%);",
            div { style: "font-size: 26px; font-weight: 500;", Icon { icon: MdSearch, style: "width: 24px; height: 24px; vertical-align: middle;" } " Browse entries" }
            div {
                style: "font-size: 18px; line-height: 1.5; color: rgba(255,255,255,0.92);",
                "Narrow the database from disease down to epitope, or search across every field at once."
            }
        }
    }
}

#[component]
fn ImportCard() -> Element {
    let session = use_session();
    if !session.is_signed_in() {
        return rsx! {};
    }
    rsx! {
        Link {
            to: Route::ImportPage {},
            class: "x-home-card",
            style: "background: linear-gradient(135deg, #0B7A2B 0%, #23A340 60%, #178E35 100%);",
            div { style: "font-size: 26px; font-weight: 500;", Icon { icon: MdFileUpload, style: "width: 24px; height: 24px; vertical-align: middle;" } " Import entries" }
            div {
                style: "font-size: 18px; line-height: 1.5; color: rgba(255,255,255,0.92);",
                "Add many entries at once from a CSV file."
            }
        }
    }
}

#[component]
fn DashboardStatistics() -> Element {
    let session = use_session();
    let token = use_session_token();
    let stats = use_resource(move || {
        let token = token.read().clone();
        let with_users = session.can_manage_users();
        async move {
            let users = async {
                if with_users { user_stats(token.clone()).await.map(Some) } else { Ok(None) }
            };
            try_join(statistics_overview(token.clone()), users).await
        }
    });

    let stats = stats.read();
    let (entries, users) = match stats.as_ref() {
        Some(Err(e)) => return rsx! { ComponentErrorDisplay { error_txt: error_text(e) } },
        Some(Ok(s)) => s.clone(),
        None => return rsx! { LoadingIndicator { label: "Loading statistics..." } },
    };

    rsx! {
        EntryStatistics { stats: entries }
        if let Some(users) = users {
            UserStatistics { stats: users }
        }
    }
}

#[component]
fn EntryStatistics(stats: StatisticsOverview) -> Element {
    rsx! {
        div {
            class: "x-card",
            h2 { style: "margin-top: 0;", "Database overview" }
            div {
                style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 16px;",
                for (label, value) in stats.overview_rows() {
                    StatTile { key: "{label}", label: humanize(&label), value }
                }
            }
            div {
                style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 24px; margin-top: 20px;",
                BucketList { title: "Diseases", buckets: stats.disease_breakdown.clone() }
                BucketList { title: "Top autoantibodies", buckets: stats.top_antibodies.clone() }
                BucketList { title: "Top autoantigens", buckets: stats.top_antigens.clone() }
            }
        }
    }
}

#[component]
fn UserStatistics(stats: UserStats) -> Element {
    let overview = stats.overview;
    rsx! {
        div {
            class: "x-card",
            h2 { style: "margin-top: 0;", "Accounts" }
            div {
                style: "display: flex; flex-direction: row; flex-wrap: wrap; gap: 16px;",
                StatTile { label: "Total users", value: "{overview.total_users}" }
                StatTile { label: "Active", value: "{overview.active_users}" }
                StatTile { label: "Inactive", value: "{overview.inactive_users}" }
                for role in stats.role_stats.iter() {
                    StatTile { key: "{role.role}", label: "{role.role}", value: "{role.count}" }
                }
            }
        }
    }
}

#[component]
fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "x-stat-tile",
            div { style: "font-size: 28px; font-weight: 600; color: #1C212D;", "{value}" }
            div { style: "font-size: 14px; color: #6B7280;", "{label}" }
        }
    }
}

#[component]
fn BucketList(title: String, buckets: Vec<CountBucket>) -> Element {
    if buckets.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            style: "min-width: 240px;",
            h3 { style: "font-size: 16px; margin: 0 0 8px 0;", "{title}" }
            ul {
                style: "list-style: none; margin: 0; padding: 0;",
                for bucket in buckets.iter().take(10) {
                    li {
                        key: "{bucket.name}",
                        style: "display: flex; justify-content: space-between; gap: 16px; padding: 3px 0; border-bottom: 1px solid #E5E7EB;",
                        span { "{bucket.name}" }
                        span { style: "color: #6B7280;", "{bucket.count}" }
                    }
                }
            }
        }
    }
}

/// `totalEntries` -> `Total entries`.
fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
