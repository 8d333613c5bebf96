use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CustomerEmail, CustomerName, CustomerPhone};
use crate::slots::TimeSlot;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm{
    pub table_id: i32,
    pub date: String,
    pub time: String,
    pub party_size: i32,
    pub customer: CustomerForm,
    pub notes: Option<String>
}

#[derive(Deserialize, Debug)]
pub struct CustomerForm{
    pub name: String,
    pub email: String,
    pub phone: Option<String>
}

// One entry per field that failed validation; rendered as the "errors"
// array of a 400 response.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError{
    pub field: &'static str,
    pub message: String
}

impl FieldError{
    fn new(field: &'static str, message: impl Into<String>) -> Self{
        FieldError{ field, message: message.into() }
    }
}

// A booking request with every field checked. Capacity against the actual
// table is the one check left to the booking transaction, which resolves
// the table row.
#[derive(Debug)]
pub struct ValidBooking{
    pub table_id: i32,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub party_size: i32,
    pub customer_name: CustomerName,
    pub customer_email: CustomerEmail,
    pub customer_phone: Option<CustomerPhone>,
    pub notes: Option<String>
}

impl ValidBooking{
    // Collects every field failure instead of stopping at the first, so the
    // caller can render per-field messages.
    pub fn parse(form: BookingForm, today: NaiveDate) -> Result<ValidBooking, Vec<FieldError>>{
        let mut errors = Vec::new();

        if form.table_id <= 0 {
            errors.push(FieldError::new("tableId", "tableId must be a positive number"));
        }

        let date = match NaiveDate::parse_from_str(&form.date, "%Y-%m-%d"){
            Ok(date) if date >= today => Some(date),
            Ok(_) => {
                errors.push(FieldError::new("date", "date must be today or later"));
                None
            },
            Err(_) => {
                errors.push(FieldError::new(
                    "date",
                    format!("{} is not a valid ISO date", form.date)
                ));
                None
            }
        };

        let time = match TimeSlot::parse(&form.time){
            Ok(slot) => Some(slot),
            Err(message) => {
                errors.push(FieldError::new("time", message));
                None
            }
        };

        if !(1..=20).contains(&form.party_size){
            errors.push(FieldError::new("partySize", "partySize must be between 1 and 20"));
        }

        let customer_name = match CustomerName::parse(form.customer.name){
            Ok(name) => Some(name),
            Err(message) => {
                errors.push(FieldError::new("customer.name", message));
                None
            }
        };

        let customer_email = match CustomerEmail::parse(form.customer.email){
            Ok(email) => Some(email),
            Err(message) => {
                errors.push(FieldError::new("customer.email", message));
                None
            }
        };

        let customer_phone = match form.customer.phone{
            None => None,
            Some(phone) => match CustomerPhone::parse(phone){
                Ok(phone) => Some(phone),
                Err(message) => {
                    errors.push(FieldError::new("customer.phone", message));
                    None
                }
            }
        };

        let notes = form.notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        if !errors.is_empty(){
            return Err(errors)
        }

        Ok(ValidBooking{
            table_id: form.table_id,
            date: date.unwrap(),
            time: time.unwrap(),
            party_size: form.party_size,
            customer_name: customer_name.unwrap(),
            customer_email: customer_email.unwrap(),
            customer_phone,
            notes
        })
    }
}
