use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A shared pasture that users join and graze cows on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Commons {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cow_price: f64,
    #[serde(default)]
    pub milk_price: f64,
    #[serde(default)]
    pub starting_balance: f64,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl Commons {
    /// Entity-type name used in not-found messages
    pub const ENTITY: &'static str = "Commons";

    /// Overwrite every editable field from `other`, keeping this record's id
    pub fn apply_edit(&mut self, other: &Commons) {
        self.name = other.name.clone();
        self.cow_price = other.cow_price;
        self.milk_price = other.milk_price;
        self.starting_balance = other.starting_balance;
        self.start_date = other.start_date;
        self.end_date = other.end_date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_payload() {
        let commons: Commons = serde_json::from_value(json!({
            "name": "TestCommons",
            "cowPrice": 10.4,
            "milkPrice": 5.6,
            "startingBalance": 50.0,
            "startDate": "2022-03-07T21:18:27Z"
        }))
        .unwrap();

        assert_eq!(commons.id, None);
        assert_eq!(commons.cow_price, 10.4);
        assert_eq!(commons.start_date.unwrap().timestamp(), 1646687907);
        assert_eq!(commons.end_date, None);
    }

    #[test]
    fn unsaved_commons_serializes_without_id() {
        let value = serde_json::to_value(Commons {
            id: None,
            name: "Pasture".to_string(),
            cow_price: 1.0,
            milk_price: 2.0,
            starting_balance: 3.0,
            start_date: None,
            end_date: None,
        })
        .unwrap();

        assert!(value.get("id").is_none());
        assert_eq!(value["startingBalance"], json!(3.0));
    }

    #[test]
    fn apply_edit_keeps_id() {
        let mut stored = Commons {
            id: Some(67),
            name: "Old".to_string(),
            cow_price: 10.4,
            milk_price: 5.6,
            starting_balance: 50.0,
            start_date: None,
            end_date: None,
        };
        let edit = Commons {
            id: Some(99),
            name: "New".to_string(),
            cow_price: 10.0,
            milk_price: 5.0,
            starting_balance: 51.0,
            start_date: None,
            end_date: None,
        };

        stored.apply_edit(&edit);
        assert_eq!(stored.id, Some(67));
        assert_eq!(stored.name, "New");
        assert_eq!(stored.starting_balance, 51.0);
    }
}
