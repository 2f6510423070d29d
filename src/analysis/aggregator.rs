//! Campaign aggregation and rankings.
//!
//! Every function here works on a filtered table. Groups are kept in
//! encounter order and all sorts are stable, so ties rank in the order
//! the group first appeared.

use crate::data::CampaignTable;
use crate::models::{
    CampaignRecord, CategoryShare, InfluencerRevenue, InfluencerRoas, PlatformRevenue, Roas,
    Summary,
};
use std::collections::HashMap;
use std::hash::Hash;

/// Default length of the influencer rankings.
pub const DEFAULT_TOP_N: usize = 5;

/// Compute the full summary for a filtered table.
pub fn summarize(table: &CampaignTable, top_n: usize) -> Summary {
    let total_revenue = table.records().fold(0.0, |acc, r| acc + r.revenue);
    let total_orders = table
        .records()
        .fold(0u64, |acc, r| acc.saturating_add(r.orders));
    let total_payout = table.records().fold(0.0, |acc, r| acc + r.total_payout);

    Summary {
        total_revenue,
        total_orders,
        total_payout,
        roas: Roas::from_totals(total_revenue, total_payout),
        top_influencers_by_revenue: top_influencers_by_revenue(table, top_n),
        bottom_influencers_by_roas: bottom_influencers_by_roas(table, top_n),
        revenue_by_platform: revenue_by_platform(table),
        category_distribution: category_distribution(table),
    }
}

/// Fold records into groups keyed by `key`, keeping first-encounter order.
/// `init` builds a group from its first record before it is folded in.
fn group_in_order<'a, K, T, I, F, N, G>(records: I, key: F, init: N, mut fold: G) -> Vec<T>
where
    K: Eq + Hash,
    I: Iterator<Item = &'a CampaignRecord>,
    F: Fn(&'a CampaignRecord) -> K,
    N: Fn(&'a CampaignRecord) -> T,
    G: FnMut(&mut T, &'a CampaignRecord),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<T> = Vec::new();

    for record in records {
        let slot = *index.entry(key(record)).or_insert_with(|| {
            groups.push(init(record));
            groups.len() - 1
        });
        fold(&mut groups[slot], record);
    }

    groups
}

/// Per-influencer sums of revenue, payout and orders.
#[derive(Debug)]
struct InfluencerTotals {
    influencer_id: String,
    name: String,
    revenue: f64,
    total_payout: f64,
    orders: u64,
}

/// Group by `(influencer_id, name)`.
fn group_by_influencer(table: &CampaignTable) -> Vec<InfluencerTotals> {
    group_in_order(
        table.records(),
        |r| (r.influencer_id.as_str(), r.name.as_str()),
        |r| InfluencerTotals {
            influencer_id: r.influencer_id.clone(),
            name: r.name.clone(),
            revenue: 0.0,
            total_payout: 0.0,
            orders: 0,
        },
        |totals: &mut InfluencerTotals, r| {
            totals.revenue += r.revenue;
            totals.total_payout += r.total_payout;
            totals.orders = totals.orders.saturating_add(r.orders);
        },
    )
}

/// Influencers with the highest summed revenue, at most `n`.
pub fn top_influencers_by_revenue(table: &CampaignTable, n: usize) -> Vec<InfluencerRevenue> {
    let mut ranked: Vec<InfluencerRevenue> = group_by_influencer(table)
        .into_iter()
        .map(|g| InfluencerRevenue {
            influencer_id: g.influencer_id,
            name: g.name,
            revenue: g.revenue,
        })
        .collect();

    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked.truncate(n);
    ranked
}

/// Influencers with the lowest ROAS among those with at least one order,
/// at most `n`. Undefined ROAS (zero payout) ranks after every defined value.
pub fn bottom_influencers_by_roas(table: &CampaignTable, n: usize) -> Vec<InfluencerRoas> {
    let mut ranked: Vec<InfluencerRoas> = group_by_influencer(table)
        .into_iter()
        .filter(|g| g.orders > 0)
        .map(|g| InfluencerRoas {
            roas: Roas::from_totals(g.revenue, g.total_payout),
            influencer_id: g.influencer_id,
            name: g.name,
            revenue: g.revenue,
            total_payout: g.total_payout,
            orders: g.orders,
        })
        .collect();

    ranked.sort_by(|a, b| a.roas.cmp_undefined_last(&b.roas));
    ranked.truncate(n);
    ranked
}

/// Revenue per platform, highest first.
pub fn revenue_by_platform(table: &CampaignTable) -> Vec<PlatformRevenue> {
    let mut platforms = group_in_order(
        table.records(),
        |r| r.platform.as_str(),
        |r| PlatformRevenue {
            platform: r.platform.clone(),
            revenue: 0.0,
        },
        |acc: &mut PlatformRevenue, r| acc.revenue += r.revenue,
    );

    platforms.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    platforms
}

/// Row count and share per category, most frequent first.
pub fn category_distribution(table: &CampaignTable) -> Vec<CategoryShare> {
    let total = table.len();
    let mut categories = group_in_order(
        table.records(),
        |r| r.category.as_str(),
        |r| CategoryShare {
            category: r.category.clone(),
            count: 0,
            share_percent: 0.0,
        },
        |acc: &mut CategoryShare, _| acc.count += 1,
    );

    for share in &mut categories {
        share.share_percent = share.count as f64 / total as f64 * 100.0;
    }

    categories.sort_by_key(|c| std::cmp::Reverse(c.count));
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{filter, FilterSelection};
    use crate::data::{clean, RawTable};
    use crate::models::Dimension;
    use std::path::Path;

    const SAMPLE: &str = include_str!("../../fixtures/sample_campaigns.csv");
    const HEADER: &str =
        "influencer_id,name,platform,product,category,gender,revenue,orders,total_payout";

    fn table_from(text: &str) -> CampaignTable {
        clean(RawTable::parse(text, Path::new("test.csv")).unwrap()).unwrap()
    }

    fn sample_table() -> CampaignTable {
        table_from(SAMPLE)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_totals() {
        let summary = summarize(&sample_table(), DEFAULT_TOP_N);

        assert!(approx(summary.total_revenue, 22650.5));
        assert_eq!(summary.total_orders, 189);
        assert!(approx(summary.total_payout, 7100.0));
        assert!(approx(summary.roas.value().unwrap(), 22650.5 / 7100.0));
    }

    #[test]
    fn test_order_totals_saturate() {
        let text = format!(
            "{}\nA,Ann,Instagram,Gritzo,Fitness,Female,100,18446744073709551615,10\nA,Ann,YouTube,Gritzo,Fitness,Female,50,1,10\n",
            HEADER
        );
        let summary = summarize(&table_from(&text), DEFAULT_TOP_N);

        assert_eq!(summary.total_orders, u64::MAX);
        assert_eq!(summary.bottom_influencers_by_roas.len(), 1);
        assert_eq!(summary.bottom_influencers_by_roas[0].orders, u64::MAX);
    }

    #[test]
    fn test_empty_table_summary() {
        let table = sample_table();
        let selection = FilterSelection::all(&table).with(Dimension::Gender, Vec::<String>::new());
        let summary = summarize(&filter(&table, &selection), DEFAULT_TOP_N);

        assert_eq!(summary, Summary::default());
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_payout, 0.0);
        assert!(summary.roas.is_undefined());
        assert!(summary.category_distribution.is_empty());
    }

    #[test]
    fn test_top_influencers_by_revenue() {
        let table = sample_table();
        let top = top_influencers_by_revenue(&table, 5);

        let ids: Vec<_> = top.iter().map(|i| i.influencer_id.as_str()).collect();
        assert_eq!(ids, vec!["INF001", "INF002", "INF008", "INF003", "INF005"]);
        assert!(approx(top[0].revenue, 8500.5));
        assert_eq!(top[0].name, "Aarav Sharma");

        for pair in top.windows(2) {
            assert!(pair[0].revenue >= pair[1].revenue);
        }
        for entry in &top {
            assert!(table.records().any(|r| r.influencer_id == entry.influencer_id));
        }
    }

    #[test]
    fn test_top_influencers_fewer_groups_than_n() {
        let table = sample_table();
        let top = top_influencers_by_revenue(&table, 20);
        assert_eq!(top.len(), 6);
    }

    #[test]
    fn test_top_influencers_ties_keep_encounter_order() {
        let text = format!(
            "{}\nB,Bea,Instagram,Gritzo,Fitness,Female,100,1,10\nA,Ann,Instagram,Gritzo,Fitness,Female,100,1,10\nC,Cal,Instagram,Gritzo,Fitness,Male,300,1,10\n",
            HEADER
        );
        let top = top_influencers_by_revenue(&table_from(&text), 5);
        let ids: Vec<_> = top.iter().map(|i| i.influencer_id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_same_id_different_name_are_separate_groups() {
        let text = format!(
            "{}\nX,Old Name,Instagram,Gritzo,Fitness,Female,100,1,10\nX,New Name,Instagram,Gritzo,Fitness,Female,50,1,10\n",
            HEADER
        );
        let top = top_influencers_by_revenue(&table_from(&text), 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Old Name");
    }

    #[test]
    fn test_bottom_influencers_by_roas() {
        let table = sample_table();
        let bottom = bottom_influencers_by_roas(&table, 5);

        let ids: Vec<_> = bottom.iter().map(|i| i.influencer_id.as_str()).collect();
        // INF004 has no orders; INF005 has zero payout and ranks last
        assert_eq!(ids, vec!["INF003", "INF008", "INF001", "INF002", "INF005"]);
        assert!(bottom.iter().all(|i| i.orders > 0));
        assert!(bottom[4].roas.is_undefined());
        assert!(approx(bottom[0].roas.value().unwrap(), 950.0 / 1500.0));
    }

    #[test]
    fn test_bottom_influencers_sorted_ascending() {
        let bottom = bottom_influencers_by_roas(&sample_table(), 5);
        for pair in bottom.windows(2) {
            assert_ne!(
                pair[0].roas.cmp_undefined_last(&pair[1].roas),
                std::cmp::Ordering::Greater
            );
        }
    }

    #[test]
    fn test_zero_payout_with_orders_is_retained() {
        let text = format!(
            "{}\nZ,Zed,Facebook,Gritzo,Lifestyle,Male,600,3,0\n",
            HEADER
        );
        let table = table_from(&text);
        let bottom = bottom_influencers_by_roas(&table, 5);

        assert_eq!(bottom.len(), 1);
        assert!(bottom[0].roas.is_undefined());
        assert!(summarize(&table, 5).roas.is_undefined());
    }

    #[test]
    fn test_bottom_respects_limit() {
        let bottom = bottom_influencers_by_roas(&sample_table(), 2);
        assert_eq!(bottom.len(), 2);
        assert_eq!(bottom[0].influencer_id, "INF003");
    }

    #[test]
    fn test_revenue_by_platform() {
        let platforms = revenue_by_platform(&sample_table());
        let names: Vec<_> = platforms.iter().map(|p| p.platform.as_str()).collect();

        assert_eq!(names, vec!["YouTube", "Instagram", "Twitter", "Facebook"]);
        assert!(approx(platforms[0].revenue, 11300.0));
        assert!(approx(platforms[1].revenue, 9800.5));
    }

    #[test]
    fn test_category_distribution() {
        let categories = category_distribution(&sample_table());
        let names: Vec<_> = categories.iter().map(|c| c.category.as_str()).collect();

        assert_eq!(names, vec!["Fitness", "Health", "Lifestyle", "Nutrition"]);
        assert_eq!(categories[0].count, 2);
        assert_eq!(categories[3].count, 1);

        let total_share: f64 = categories.iter().map(|c| c.share_percent).sum();
        assert!(approx(total_share, 100.0));
        assert!(approx(categories[3].share_percent, 100.0 / 7.0));
    }

    #[test]
    fn test_summary_uses_filtered_rows() {
        let table = sample_table();
        let selection = FilterSelection::all(&table).with(Dimension::Platform, ["YouTube"]);
        let summary = summarize(&filter(&table, &selection), DEFAULT_TOP_N);

        assert!(approx(summary.total_revenue, 11300.0));
        assert_eq!(summary.total_orders, 95);
        assert_eq!(summary.revenue_by_platform.len(), 1);
        assert_eq!(summary.top_influencers_by_revenue.len(), 2);
    }
}
