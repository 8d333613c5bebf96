use std::collections::{BTreeMap, HashSet};

use anyhow::Context;
use chrono::NaiveDate;

use crate::{
    db_interaction::{active_tables, occupied_slots},
    models::DiningTable,
    slots::{TimeSlot, TIME_SLOTS},
    telemetry::spawn_blocking_with_tracing,
    utils::DbConnection
};

pub enum Availability{
    // Free tables for the one requested slot.
    ForSlot(Vec<DiningTable>),
    // Free tables for every slot of the grid, keyed by slot label.
    BySlot(BTreeMap<String, Vec<DiningTable>>)
}

// Always computed fresh against the live reservation set. A result may be
// stale by the time it is rendered; the booking transaction re-validates,
// so staleness here costs a 409 at worst.
#[tracing::instrument(
    "Computing table availability",
    skip(conn)
)]
pub async fn compute_availability(
    mut conn: DbConnection,
    date: NaiveDate,
    time: Option<TimeSlot>,
    min_capacity: Option<i32>
) -> Result<Availability, anyhow::Error>{
    let res = spawn_blocking_with_tracing(move || -> Result<Availability, anyhow::Error> {
        let tables = active_tables(&mut conn, min_capacity)
            .context("Failed to load active tables")?;

        let occupied = occupied_slots(&mut conn, date, time.as_ref().map(|t| t.as_str()))
            .context("Failed to load occupied slots")?;

        match time {
            Some(_) => {
                let taken: HashSet<i32> = occupied.iter()
                    .map(|(_, table_id)| *table_id)
                    .collect();

                Ok(Availability::ForSlot(free_tables(&tables, &taken)))
            },

            None => {
                let mut by_slot = BTreeMap::new();

                for slot in TIME_SLOTS.iter(){
                    let taken: HashSet<i32> = occupied.iter()
                        .filter(|(time, _)| time == slot)
                        .map(|(_, table_id)| *table_id)
                        .collect();

                    by_slot.insert(slot.to_string(), free_tables(&tables, &taken));
                }

                Ok(Availability::BySlot(by_slot))
            }
        }
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

// Set difference at the heart of the calculation: eligible tables minus
// tables already holding an active reservation. Input order (ascending
// id) is preserved.
fn free_tables(tables: &[DiningTable], taken: &HashSet<i32>) -> Vec<DiningTable>{
    tables.iter()
        .filter(|table| !taken.contains(&table.id))
        .cloned()
        .collect()
}
