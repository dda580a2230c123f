//! HTML rendering for the site pages
//!
//! Templates live in `templates/` and are compiled into the binary. The
//! renderer holds no form state: it is handed values, errors and the last
//! notification each time and binds them to the role's controls.

use crate::core::{Field, FieldErrors, Notification, RawFormValues, Role};
use serde::Serialize;
use tera::{Context, Tera};

/// Describes one input control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    pub id: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub pattern: Option<&'static str>,
    pub min: Option<u32>,
    pub required: bool,
}

impl FieldSpec {
    fn text(field: Field, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            field,
            id: field.id(),
            label,
            input_type: "text",
            placeholder,
            pattern: field.format().map(|f| f.html_pattern()),
            min: None,
            required: true,
        }
    }

    fn typed(mut self, input_type: &'static str) -> Self {
        self.input_type = input_type;
        self
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn min(mut self, min: u32) -> Self {
        self.min = Some(min);
        self
    }
}

/// Controls for `role`, in display order
pub fn fields_for(role: Role) -> Vec<FieldSpec> {
    let name_label = match role {
        Role::Buyer => "Buyer Name*",
        Role::Seller => "Seller Name*",
    };

    let mut fields = vec![
        FieldSpec::text(Field::Name, name_label, "Enter your name"),
        FieldSpec::text(Field::Phone, "Phone Number*", "Enter 10-digit phone number").typed("tel"),
        FieldSpec::text(Field::Email, "Email", "Enter your email")
            .typed("email")
            .optional(),
        FieldSpec::text(Field::Location, "Delivery Address*", "Enter delivery address"),
        FieldSpec::text(Field::PinCode, "PIN Code*", "Enter 6-digit PIN code"),
    ];

    match role {
        Role::Buyer => {
            fields.push(
                FieldSpec::text(
                    Field::Quantity,
                    "Quantity Needed (Liters)*",
                    "Enter quantity in liters",
                )
                .typed("number")
                .min(1),
            );
            fields.push(FieldSpec::text(Field::DeliveryDate, "Delivery Date*", "").typed("date"));
        }
        Role::Seller => {
            fields.push(FieldSpec::text(
                Field::SocietyName,
                "Society Name*",
                "Enter society name",
            ));
            fields.push(
                FieldSpec::text(
                    Field::Quantity,
                    "Quantity Available (Liters)*",
                    "Enter available quantity in liters",
                )
                .typed("number")
                .min(1),
            );
        }
    }

    fields
}

/// One card on the role selector
#[derive(Debug, Clone, Serialize)]
pub struct RoleChoice {
    pub role: Role,
    pub heading: &'static str,
    pub blurb: &'static str,
    pub action: &'static str,
}

/// The two selector cards, buyer first
pub fn role_choices() -> [RoleChoice; 2] {
    [
        RoleChoice {
            role: Role::Buyer,
            heading: "I want to buy water",
            blurb: "Looking to purchase treated water for your needs?",
            action: "Continue as Buyer",
        },
        RoleChoice {
            role: Role::Seller,
            heading: "I want to sell water",
            blurb: "Have treated water to supply?",
            action: "Continue as Seller",
        },
    ]
}

/// Everything the form page shows
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub role: Role,
    pub values: &'a RawFormValues,
    pub errors: &'a FieldErrors,
    pub notification: Option<&'a Notification>,
    pub submitting: bool,
}

#[derive(Serialize)]
struct BoundField<'a> {
    #[serde(flatten)]
    spec: FieldSpec,
    value: &'a str,
    error: Option<&'a str>,
}

/// Renders site pages from the bundled templates
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("index.html", include_str!("../../templates/index.html")),
            ("form.html", include_str!("../../templates/form.html")),
            ("about.html", include_str!("../../templates/about.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Landing page with the role selector
    pub fn landing(&self) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("choices", &role_choices());
        self.tera.render("index.html", &context)
    }

    /// The role's form bound to `view`
    pub fn form(&self, view: FormView<'_>) -> Result<String, tera::Error> {
        let fields: Vec<BoundField<'_>> = fields_for(view.role)
            .into_iter()
            .map(|spec| BoundField {
                value: view.values.get(spec.id).unwrap_or_default(),
                error: view.errors.get(spec.field),
                spec,
            })
            .collect();

        let mut context = Context::new();
        context.insert("role", &view.role);
        context.insert("title", view.role.form_title());
        context.insert("fields", &fields);
        context.insert("notification", &view.notification);
        context.insert("submitting", &view.submitting);
        self.tera.render("form.html", &context)
    }

    pub fn about(&self) -> Result<String, tera::Error> {
        self.tera.render("about.html", &Context::new())
    }
}
