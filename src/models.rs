use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::{Insertable, Queryable};
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::reservations;
use crate::schema::tables;

// Statuses counting against slot occupancy, as stored in the status column.
pub const ACTIVE_STATUSES: [&str; 2] = ["pending", "confirmed"];

#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = tables)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable{
    pub id: i32,
    pub capacity: i32,
    #[serde(rename = "type")]
    pub table_type: String,
    pub is_active: bool,
    pub description: Option<String>
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = reservations)]
pub struct Reservation{
    pub reservation_id: Uuid,
    pub table_id: i32,
    pub user_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: String,
    pub party_size: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableType{
    Window,
    Center,
    Terrace,
    Private,
    Bar,
    Family
}

impl TableType{
    pub fn parse(value: &str) -> Result<TableType, String>{
        match value {
            "Window" => Ok(TableType::Window),
            "Center" => Ok(TableType::Center),
            "Terrace" => Ok(TableType::Terrace),
            "Private" => Ok(TableType::Private),
            "Bar" => Ok(TableType::Bar),
            "Family" => Ok(TableType::Family),
            other => Err(format!("{} is not a valid table type", other))
        }
    }

    pub fn as_str(&self) -> &'static str{
        match self {
            TableType::Window => "Window",
            TableType::Center => "Center",
            TableType::Terrace => "Terrace",
            TableType::Private => "Private",
            TableType::Bar => "Bar",
            TableType::Family => "Family"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus{
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(rename = "no-show")]
    NoShow
}

impl ReservationStatus{
    pub fn parse(value: &str) -> Result<ReservationStatus, String>{
        match value {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            "no-show" => Ok(ReservationStatus::NoShow),
            other => Err(format!("{} is not a valid reservation status", other))
        }
    }

    pub fn as_str(&self) -> &'static str{
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
            ReservationStatus::NoShow => "no-show"
        }
    }

    // Active reservations hold their slot against new bookings.
    pub fn is_active(&self) -> bool{
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool{
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed | ReservationStatus::NoShow
        )
    }

    // Transitions only move forward; terminal states admit nothing.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool{
        matches!(
            (self, next),
            (ReservationStatus::Pending, ReservationStatus::Confirmed)
                | (ReservationStatus::Pending, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::Completed)
                | (ReservationStatus::Confirmed, ReservationStatus::Cancelled)
                | (ReservationStatus::Confirmed, ReservationStatus::NoShow)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_str(), f)
    }
}

// Customer snapshot as it travels on the wire; flattened into columns in
// the reservations table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CustomerDetails{
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReservationBody{
    pub id: Uuid,
    pub table_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: String,
    pub party_size: i32,
    pub customer: CustomerDetails,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<DiningTable>
}

impl ReservationBody{
    pub fn from_record(reservation: Reservation, table: Option<DiningTable>) -> Self{
        ReservationBody{
            id: reservation.reservation_id,
            table_id: reservation.table_id,
            user_id: reservation.user_id,
            date: reservation.date,
            time: reservation.time,
            party_size: reservation.party_size,
            customer: CustomerDetails{
                name: reservation.customer_name,
                email: reservation.customer_email,
                phone: reservation.customer_phone
            },
            status: reservation.status,
            notes: reservation.notes,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
            table
        }
    }
}
