//! Terminal presentation for the interactive client: command grammar, table rendering and
//! per-page views of backend data.

pub mod command;
pub mod format;
pub mod outputformatter;

pub use command::{parse, Command};
pub use outputformatter::{print_json, render_table, table_from_json};

use crate::api::dto::{AvailableLot, DashboardStats, LotSpots, ManagedLot, Reservation};
use format::{format_currency, format_date, format_datetime, format_duration, occupancy_class};

fn cols(names: &[&str]) -> Vec<String> { names.iter().map(|s| s.to_string()).collect() }

fn opt<T: ToString>(v: &Option<T>) -> String {
    v.as_ref().map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn lots_table(lots: &[AvailableLot]) -> String {
    let rows: Vec<Vec<String>> = lots
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.name.clone(),
                format_currency(Some(l.price_per_hour)),
                format!("{}/{}", l.available_spots, l.total_spots),
                opt(&l.address),
                opt(&l.pincode),
            ]
        })
        .collect();
    render_table(&cols(&["id", "name", "per hour", "free", "address", "pincode"]), &rows)
}

pub fn reservations_table(list: &[Reservation]) -> String {
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                opt(&r.lot_id),
                opt(&r.spot_number),
                format_datetime(r.parking_timestamp.as_deref()),
                format_datetime(r.leaving_timestamp.as_deref()),
                format_duration(r.parking_timestamp.as_deref(), r.leaving_timestamp.as_deref()),
                format_currency(r.parking_cost),
                r.status.clone(),
            ]
        })
        .collect();
    render_table(&cols(&["id", "lot", "spot", "parked", "left", "duration", "cost", "status"]), &rows)
}

pub fn managed_lots_table(lots: &[ManagedLot]) -> String {
    let rows: Vec<Vec<String>> = lots
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.name.clone(),
                format_currency(Some(l.price_per_hour)),
                l.number_of_spots.to_string(),
                l.occupied.to_string(),
                l.available.to_string(),
                opt(&l.address),
                format_date(l.created_at.as_deref()),
            ]
        })
        .collect();
    render_table(&cols(&["id", "name", "per hour", "spots", "occupied", "available", "address", "created"]), &rows)
}

pub fn spots_table(lot: &LotSpots) -> String {
    let rows: Vec<Vec<String>> = lot
        .spots
        .iter()
        .map(|s| {
            let (res, user, since) = match &s.reservation {
                Some(r) => (r.reservation_id.to_string(), r.user_id.to_string(), format_datetime(r.parking_timestamp.as_deref())),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };
            let state = if s.is_occupied() { "occupied" } else { "available" };
            vec![s.spot_number.to_string(), state.to_string(), res, user, since]
        })
        .collect();
    format!(
        "lot {} ({})\n{}",
        lot.lot.id,
        lot.lot.name,
        render_table(&cols(&["spot", "state", "reservation", "user", "since"]), &rows)
    )
}

pub fn stats_summary(s: &DashboardStats) -> String {
    [
        format!("lots: {}  spots: {}", s.total_lots, s.total_spots),
        format!(
            "occupied: {}  available: {}  occupancy: {:.2}% [{}]",
            s.occupied_spots,
            s.available_spots,
            s.occupancy_rate,
            occupancy_class(s.occupancy_rate)
        ),
        format!("active reservations: {}  users: {}", s.active_reservations, s.total_users),
        format!(
            "revenue today: {}  this month: {}",
            format_currency(Some(s.today_revenue)),
            format_currency(Some(s.month_revenue))
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_summary_mentions_occupancy_class() {
        let s = DashboardStats {
            total_lots: 2,
            total_spots: 10,
            occupied_spots: 9,
            available_spots: 1,
            occupancy_rate: 90.0,
            active_reservations: 9,
            total_users: 4,
            today_revenue: 120.0,
            month_revenue: 2400.5,
        };
        let out = stats_summary(&s);
        assert!(out.contains("occupancy: 90.00% [text-danger]"));
        assert!(out.contains("this month: ₹2400.50"));
    }

    #[test]
    fn reservation_rows_fill_missing_fields() {
        let r = Reservation {
            id: 8,
            spot_id: 3,
            spot_number: None,
            lot_id: Some(1),
            parking_timestamp: Some("2024-03-05T09:00:00".into()),
            leaving_timestamp: Some("2024-03-05T10:30:00".into()),
            parking_cost: Some(40.0),
            status: "completed".into(),
        };
        let out = reservations_table(&[r]);
        assert!(out.contains("1h 30m"));
        assert!(out.contains("₹40.00"));
        assert!(out.contains("rows: 1"));
    }
}
