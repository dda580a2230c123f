//! JSON body posted to the lead endpoints

use crate::core::Role;
use crate::core::form::FormValues;
use serde::{Deserialize, Serialize};

/// Role-tagged projection of validated form values
///
/// Keys follow what the lead sheets expect: `location` is sent as `address`,
/// `pinCode` as `pincode`. Buyers send an empty `societyname`; sellers omit
/// `deliveryDate` entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(rename = "type")]
    pub role: Role,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub societyname: String,
    pub quantity: String,
    pub address: String,
    pub pincode: String,
    #[serde(
        rename = "deliveryDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_date: Option<String>,
}

impl From<&FormValues> for SubmissionPayload {
    fn from(values: &FormValues) -> Self {
        let contact = values.contact();
        let (societyname, delivery_date) = match values {
            FormValues::Buyer(b) => (String::new(), Some(b.delivery_date.clone())),
            FormValues::Seller(s) => (s.society_name.clone(), None),
        };

        Self {
            role: values.role(),
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            societyname,
            quantity: contact.quantity.clone(),
            address: contact.location.clone(),
            pincode: contact.pin_code.clone(),
            delivery_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{BuyerFormValues, ContactDetails, SellerFormValues};
    use serde_json::json;

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "A".to_string(),
            phone: "9876543210".to_string(),
            email: String::new(),
            quantity: "500".to_string(),
            location: "Addr".to_string(),
            pin_code: "560001".to_string(),
        }
    }

    #[test]
    fn test_buyer_payload_shape() {
        let values = FormValues::Buyer(BuyerFormValues {
            contact: contact(),
            delivery_date: "2024-01-01".to_string(),
        });

        let payload = SubmissionPayload::from(&values);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "buyer",
                "name": "A",
                "phone": "9876543210",
                "email": "",
                "societyname": "",
                "quantity": "500",
                "address": "Addr",
                "pincode": "560001",
                "deliveryDate": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_seller_payload_omits_delivery_date() {
        let values = FormValues::Seller(SellerFormValues {
            contact: contact(),
            society_name: "Lakeview Residency".to_string(),
        });

        let json = serde_json::to_value(SubmissionPayload::from(&values)).unwrap();
        assert_eq!(json["type"], "seller");
        assert_eq!(json["societyname"], "Lakeview Residency");
        assert!(json.get("deliveryDate").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_payload_keys_keep_sheet_order() {
        let values = FormValues::Buyer(BuyerFormValues {
            contact: contact(),
            delivery_date: "2024-01-01".to_string(),
        });
        let body = serde_json::to_string(&SubmissionPayload::from(&values)).unwrap();
        let type_at = body.find("\"type\"").unwrap();
        let pincode_at = body.find("\"pincode\"").unwrap();
        let date_at = body.find("\"deliveryDate\"").unwrap();
        assert!(type_at < pincode_at && pincode_at < date_at);
    }
}
