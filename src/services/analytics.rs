// Per-link click analytics with monthly earnings
// Aggregation happens here, from raw click rows, so every store engine
// produces identical month buckets and totals.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    app_config::AppConfig,
    db::{AnalyticsPage, LinkStore},
    models::{AnalyticsParams, ClickRow, LinkStats, MonthlyStats, PaginatedLinkStats},
    utils::service_error::ServiceError,
};

pub struct AnalyticsService {
    store: Arc<dyn LinkStore>,
    config: Arc<AppConfig>,
}

#[derive(Default)]
struct Tally {
    total: i64,
    valid: i64,
    // YYYY-MM -> valid clicks; only months with valid clicks get an entry
    monthly: BTreeMap<String, i64>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn LinkStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self))]
    pub async fn list_with_stats(
        &self,
        params: AnalyticsParams,
    ) -> Result<PaginatedLinkStats, ServiceError> {
        let page = self
            .store
            .analytics_page(params.offset(), params.limit())
            .await?;
        let total = page.total;

        let links = aggregate(page, &self.config);
        info!(
            "Analytics page {} ({} of {} links)",
            params.page,
            links.len(),
            total
        );

        Ok(PaginatedLinkStats {
            links,
            total,
            page: params.page,
            page_size: params.page_size,
            total_pages: total_pages(total, params.page_size),
        })
    }
}

/// Ceiling division; zero links means zero pages
pub fn total_pages(total: i64, page_size: u32) -> i64 {
    if page_size == 0 {
        return 0;
    }
    let page_size = page_size as i64;
    (total + page_size - 1) / page_size
}

/// Dollars earned for `valid_clicks`, computed from integer cents
pub fn earnings(valid_clicks: i64, credit_per_click_cents: u32) -> f64 {
    (valid_clicks * credit_per_click_cents as i64) as f64 / 100.0
}

/// Fold raw click rows into per-link stats, preserving link order
pub fn aggregate(page: AnalyticsPage, config: &AppConfig) -> Vec<LinkStats> {
    let mut tallies: HashMap<i64, Tally> = HashMap::new();
    for click in &page.clicks {
        tally_click(tallies.entry(click.link_id).or_default(), click);
    }

    let cents = config.credit_per_click_cents;
    page.links
        .into_iter()
        .map(|link| {
            let tally = tallies.remove(&link.id).unwrap_or_default();
            LinkStats {
                short_url: config.short_url(&link.short_code),
                original_url: link.original_url,
                short_code: link.short_code,
                created_at: link.created_at,
                total_clicks: tally.total,
                valid_clicks: tally.valid,
                earnings: earnings(tally.valid, cents),
                monthly_stats: tally
                    .monthly
                    .into_iter()
                    .map(|(month, valid_clicks)| MonthlyStats {
                        month,
                        valid_clicks,
                        earnings: earnings(valid_clicks, cents),
                    })
                    .collect(),
            }
        })
        .collect()
}

fn tally_click(tally: &mut Tally, click: &ClickRow) {
    tally.total += 1;
    if click.is_valid {
        tally.valid += 1;
        let month = click.created_at.format("%Y-%m").to_string();
        *tally.monthly.entry(month).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Link;
    use chrono::{TimeZone, Utc};

    fn link(id: i64, code: &str) -> Link {
        Link {
            id,
            original_url: format!("https://{}.example/", code),
            short_code: code.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn click(link_id: i64, y: i32, m: u32, d: u32, is_valid: bool) -> ClickRow {
        ClickRow {
            link_id,
            created_at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            is_valid,
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(250, 100), 3);
    }

    #[test]
    fn test_earnings_use_integer_cents() {
        assert_eq!(earnings(0, 5), 0.0);
        assert_eq!(earnings(2, 5), 0.10);
        assert_eq!(earnings(3, 5), 0.15);
        assert_eq!(earnings(7, 3), 0.21);
    }

    #[test]
    fn test_totals_and_valid_counts() {
        let config = AppConfig::for_tests();
        let page = AnalyticsPage {
            total: 1,
            links: vec![link(1, "aaaaaa")],
            clicks: vec![
                click(1, 2024, 3, 1, true),
                click(1, 2024, 3, 2, true),
                click(1, 2024, 3, 3, false),
            ],
        };

        let stats = aggregate(page, &config);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_clicks, 3);
        assert_eq!(stats[0].valid_clicks, 2);
        assert_eq!(stats[0].earnings, 0.10);
        assert_eq!(stats[0].short_url, "http://short.test/aaaaaa");
    }

    #[test]
    fn test_monthly_breakdown_is_ascending_without_empty_months() {
        let config = AppConfig::for_tests();
        let page = AnalyticsPage {
            total: 1,
            links: vec![link(1, "aaaaaa")],
            clicks: vec![
                click(1, 2024, 5, 9, true),
                click(1, 2023, 12, 31, true),
                click(1, 2024, 5, 1, true),
                // Only invalid clicks in February: no entry
                click(1, 2024, 2, 14, false),
            ],
        };

        let stats = aggregate(page, &config);
        assert_eq!(
            stats[0].monthly_stats,
            vec![
                MonthlyStats {
                    month: "2023-12".to_string(),
                    valid_clicks: 1,
                    earnings: 0.05,
                },
                MonthlyStats {
                    month: "2024-05".to_string(),
                    valid_clicks: 2,
                    earnings: 0.10,
                },
            ]
        );
    }

    #[test]
    fn test_links_without_clicks_and_order_preserved() {
        let config = AppConfig::for_tests();
        let page = AnalyticsPage {
            total: 2,
            links: vec![link(2, "bbbbbb"), link(1, "aaaaaa")],
            clicks: vec![click(1, 2024, 1, 1, true)],
        };

        let stats = aggregate(page, &config);
        assert_eq!(stats[0].short_code, "bbbbbb");
        assert_eq!(stats[0].total_clicks, 0);
        assert!(stats[0].monthly_stats.is_empty());
        assert_eq!(stats[1].short_code, "aaaaaa");
        assert_eq!(stats[1].valid_clicks, 1);
    }
}
