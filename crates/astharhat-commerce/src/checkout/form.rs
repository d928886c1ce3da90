//! Checkout form contents.

use serde::{Deserialize, Serialize};

/// Contact and delivery details collected at checkout.
///
/// Every field is required. A field counts as filled once it holds a
/// non-whitespace character.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Home address (house, road).
    pub address: String,
    /// Bazar or local place.
    pub local_place: String,
    /// District.
    pub zila: String,
    /// City or upazila.
    pub city: String,
    pub zip: String,
    pub country: String,
}

impl CheckoutForm {
    /// Labels of every field, in form order.
    pub const FIELDS: [&'static str; 10] = [
        "first name",
        "last name",
        "email",
        "phone",
        "address",
        "local place",
        "zila",
        "city",
        "zip",
        "country",
    ];

    fn values(&self) -> [&str; 10] {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.local_place,
            &self.zila,
            &self.city,
            &self.zip,
            &self.country,
        ]
    }

    /// Mutable access to a field by its position in [`Self::FIELDS`].
    pub fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        let field = match index {
            0 => &mut self.first_name,
            1 => &mut self.last_name,
            2 => &mut self.email,
            3 => &mut self.phone,
            4 => &mut self.address,
            5 => &mut self.local_place,
            6 => &mut self.zila,
            7 => &mut self.city,
            8 => &mut self.zip,
            9 => &mut self.country,
            _ => return None,
        };
        Some(field)
    }

    /// Labels of blank fields, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| *label)
            .collect()
    }

    /// Whether every required field is filled.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// "address, local place, zila" as shown on the confirmation.
    pub fn one_line_address(&self) -> String {
        [&self.address, &self.local_place, &self.zila]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            first_name: "Rahim".into(),
            last_name: "Uddin".into(),
            email: "rahim@example.com".into(),
            phone: "01700000000".into(),
            address: "House 12, Road 5".into(),
            local_place: "Kawran Bazar".into(),
            zila: "Dhaka".into(),
            city: "Tejgaon".into(),
            zip: "1215".into(),
            country: "Bangladesh".into(),
        }
    }

    #[test]
    fn test_empty_form_misses_everything() {
        let form = CheckoutForm::default();
        assert_eq!(form.missing_fields().len(), 10);
        assert!(!form.is_complete());
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let mut form = filled();
        form.zila = "   ".into();
        assert_eq!(form.missing_fields(), vec!["zila"]);
    }

    #[test]
    fn test_one_line_address() {
        assert_eq!(filled().one_line_address(), "House 12, Road 5, Kawran Bazar, Dhaka");
    }

    #[test]
    fn test_field_mut_covers_all_fields() {
        let mut form = CheckoutForm::default();
        for i in 0..CheckoutForm::FIELDS.len() {
            *form.field_mut(i).unwrap() = format!("value {i}");
        }
        assert!(form.is_complete());
        assert!(form.field_mut(10).is_none());
    }
}
