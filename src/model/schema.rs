//! Per-kind table configuration: endpoints, classification fields, option
//! sets and hierarchies for every enquiry type managed from the admin surface.

use crate::model::enquiry::{Payment, Status};
use std::fmt;
use std::str::FromStr;

pub const ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnquiryKind {
    Pcc,
    Translation,
    Insurance,
    DummyTicket,
    StickerVisa,
    HrdAttestation,
    Assistant,
}

impl EnquiryKind {
    pub const ALL: [EnquiryKind; 7] = [
        EnquiryKind::Pcc,
        EnquiryKind::Translation,
        EnquiryKind::Insurance,
        EnquiryKind::DummyTicket,
        EnquiryKind::StickerVisa,
        EnquiryKind::HrdAttestation,
        EnquiryKind::Assistant,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            EnquiryKind::Pcc => "pcc",
            EnquiryKind::Translation => "translation",
            EnquiryKind::Insurance => "insurance",
            EnquiryKind::DummyTicket => "dummy-ticket",
            EnquiryKind::StickerVisa => "sticker-visa",
            EnquiryKind::HrdAttestation => "hrd",
            EnquiryKind::Assistant => "assistant",
        }
    }

    pub fn schema(&self) -> EnquirySchema {
        match self {
            EnquiryKind::Pcc => pcc_schema(),
            EnquiryKind::Translation => translation_schema(),
            EnquiryKind::Insurance => insurance_schema(),
            EnquiryKind::DummyTicket => dummy_ticket_schema(),
            EnquiryKind::StickerVisa => sticker_visa_schema(),
            EnquiryKind::HrdAttestation => hrd_schema(),
            EnquiryKind::Assistant => assistant_schema(),
        }
    }
}

impl fmt::Display for EnquiryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EnquiryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnquiryKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown enquiry kind: {s}"))
    }
}

/// Classification value copied from the API payload into the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationField {
    pub api_key: &'static str,
    pub key: &'static str,
    pub label: &'static str,
}

/// A discrete-choice filter. `options` is empty for hierarchy children,
/// whose options depend on the parent's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub sentinel: &'static str,
    pub options: Vec<&'static str>,
}

impl FilterField {
    fn new(key: &'static str, label: &'static str, sentinel: &'static str, options: &[&'static str]) -> Self {
        FilterField {
            key,
            label,
            sentinel,
            options: options.to_vec(),
        }
    }

    fn dependent(key: &'static str, label: &'static str, sentinel: &'static str) -> Self {
        FilterField::new(key, label, sentinel, &[])
    }

    pub fn is_sentinel(&self, value: &str) -> bool {
        value == self.sentinel
    }
}

/// Parent -> child option table. A three-level chain is two links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyLink {
    pub parent: &'static str,
    pub child: &'static str,
    pub options: &'static [(&'static str, &'static [&'static str])],
}

impl HierarchyLink {
    pub fn parents(&self) -> Vec<&'static str> {
        self.options.iter().map(|(parent, _)| *parent).collect()
    }

    pub fn children(&self, parent_value: &str) -> &'static [&'static str] {
        self.options
            .iter()
            .find(|(parent, _)| *parent == parent_value)
            .map(|(_, children)| *children)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
pub struct EnquirySchema {
    pub kind: EnquiryKind,
    pub title: &'static str,
    /// Collection path relative to the API base URL.
    pub resource: &'static str,
    pub fields: &'static [ClassificationField],
    pub filters: Vec<FilterField>,
    pub exact_find: Vec<FilterField>,
    pub hierarchies: &'static [HierarchyLink],
    pub statuses: &'static [Status],
    pub stats: &'static [&'static str],
    pub required: &'static [&'static str],
}

impl EnquirySchema {
    pub fn filter(&self, key: &str) -> Option<&FilterField> {
        self.filters.iter().find(|field| field.key == key)
    }

    pub fn exact(&self, key: &str) -> Option<&FilterField> {
        self.exact_find.iter().find(|field| field.key == key)
    }

    pub fn has_exact_find(&self) -> bool {
        !self.exact_find.is_empty()
    }

    /// Link in which `key` is the parent.
    pub fn child_link(&self, key: &str) -> Option<&HierarchyLink> {
        self.hierarchies.iter().find(|link| link.parent == key)
    }

    /// Link in which `key` is the child.
    pub fn parent_link(&self, key: &str) -> Option<&HierarchyLink> {
        self.hierarchies.iter().find(|link| link.child == key)
    }

    /// Keys whose values take part in free-text search: id, email, contact
    /// and every classification column of the kind. That includes free-text
    /// columns such as `companyName` and counts such as `noOfDocuments`, so a
    /// numeric query can match a document count.
    pub fn search_keys(&self) -> Vec<&'static str> {
        let mut keys = vec!["id", "email", "contact"];
        keys.extend(self.fields.iter().map(|field| field.key));
        keys
    }

    pub fn label(&self, key: &str) -> &'static str {
        match key {
            "id" => "ID",
            "email" => "Email",
            "contact" => "Contact",
            "status" => "Status",
            "payment" => "Payment",
            other => self
                .fields
                .iter()
                .find(|field| field.key == other)
                .map(|field| field.label)
                .unwrap_or("Field"),
        }
    }

    pub fn collection_path(&self) -> String {
        self.resource.trim_matches('/').to_string()
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }
}

fn status_filter(statuses: &[Status]) -> FilterField {
    let options: Vec<&'static str> = statuses.iter().map(|status| status.as_str()).collect();
    FilterField::new("status", "Status", ALL, &options)
}

fn payment_filter() -> FilterField {
    let options: Vec<&'static str> = Payment::ALL.iter().map(|payment| payment.as_str()).collect();
    FilterField::new("payment", "Payment", ALL, &options)
}

const PCC_COUNTRIES: &[&str] = &["Russia", "Serbia", "Ukraine", "Belarus", "Kazakhstan", "Uzbekistan", "Philippines"];

const PCC_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "country", key: "country", label: "Country" },
    ClassificationField { api_key: "companyName", key: "companyName", label: "Company" },
    ClassificationField { api_key: "noOfDocuments", key: "noOfDocuments", label: "Documents" },
];

const PCC_STATUSES: &[Status] = &[Status::Pending, Status::Approved, Status::Rejected];

fn pcc_schema() -> EnquirySchema {
    EnquirySchema {
        kind: EnquiryKind::Pcc,
        title: "PCC Legalization Enquiries",
        resource: "pcc/pcc-legalization/enquiry",
        fields: PCC_FIELDS,
        filters: vec![
            FilterField::new("country", "Country", ALL, PCC_COUNTRIES),
            status_filter(PCC_STATUSES),
            payment_filter(),
        ],
        exact_find: Vec::new(),
        hierarchies: &[],
        statuses: PCC_STATUSES,
        stats: &["country", "status", "payment"],
        required: &["country"],
    }
}

const LANGUAGES: &[&str] = &["Arabic", "English", "French", "Russian", "Hindi", "Urdu", "Chinese"];
const TRANSLATION_DOCUMENTS: &[&str] = &["Personal", "Educational", "Commercial", "Legal", "Medical"];

const TRANSLATION_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "sourceLanguage", key: "sourceLanguage", label: "From" },
    ClassificationField { api_key: "targetLanguage", key: "targetLanguage", label: "To" },
    ClassificationField { api_key: "documentType", key: "documentType", label: "Document" },
];

const TRANSLATION_STATUSES: &[Status] = &[Status::Pending, Status::Approved, Status::Rejected, Status::Dispatched];

fn translation_schema() -> EnquirySchema {
    EnquirySchema {
        kind: EnquiryKind::Translation,
        title: "Translation Enquiries",
        resource: "translation/enquiry",
        fields: TRANSLATION_FIELDS,
        filters: vec![
            FilterField::new("sourceLanguage", "From", ALL, LANGUAGES),
            FilterField::new("targetLanguage", "To", ALL, LANGUAGES),
            FilterField::new("documentType", "Document", ALL, TRANSLATION_DOCUMENTS),
            status_filter(TRANSLATION_STATUSES),
            payment_filter(),
        ],
        exact_find: Vec::new(),
        hierarchies: &[],
        statuses: TRANSLATION_STATUSES,
        stats: &["documentType", "status", "payment"],
        required: &["sourceLanguage", "targetLanguage"],
    }
}

const INSURANCE_PLANS: &[&str] = &["Travel Insurance", "Health Insurance", "Visit Visa Medical"];
const INSURANCE_DURATIONS: &[&str] = &["30 Days", "90 Days", "180 Days", "1 Year"];

const INSURANCE_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "insuranceType", key: "insuranceType", label: "Plan" },
    ClassificationField { api_key: "duration", key: "duration", label: "Duration" },
    ClassificationField { api_key: "fullName", key: "fullName", label: "Name" },
];

const BASIC_STATUSES: &[Status] = &[Status::Pending, Status::Approved, Status::Rejected];

fn insurance_schema() -> EnquirySchema {
    EnquirySchema {
        kind: EnquiryKind::Insurance,
        title: "Insurance Enquiries",
        resource: "insurance/enquiry",
        fields: INSURANCE_FIELDS,
        filters: vec![
            FilterField::new("insuranceType", "Plan", ALL, INSURANCE_PLANS),
            FilterField::new("duration", "Duration", ALL, INSURANCE_DURATIONS),
            status_filter(BASIC_STATUSES),
            payment_filter(),
        ],
        exact_find: Vec::new(),
        hierarchies: &[],
        statuses: BASIC_STATUSES,
        stats: &["insuranceType", "status", "payment"],
        required: &["insuranceType"],
    }
}

const TRIP_TYPES: &[&str] = &["One Way", "Round Trip", "Multi City"];
const TICKET_PURPOSES: &[&str] = &["Visa Application", "Proof of Return", "Other"];

const DUMMY_TICKET_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "tripType", key: "tripType", label: "Trip" },
    ClassificationField { api_key: "purpose", key: "purpose", label: "Purpose" },
    ClassificationField { api_key: "from", key: "from", label: "From" },
    ClassificationField { api_key: "to", key: "to", label: "To" },
];

fn dummy_ticket_schema() -> EnquirySchema {
    EnquirySchema {
        kind: EnquiryKind::DummyTicket,
        title: "Dummy Ticket Enquiries",
        resource: "dummy-ticket/enquiry",
        fields: DUMMY_TICKET_FIELDS,
        filters: vec![
            FilterField::new("tripType", "Trip", ALL, TRIP_TYPES),
            FilterField::new("purpose", "Purpose", ALL, TICKET_PURPOSES),
            status_filter(BASIC_STATUSES),
            payment_filter(),
        ],
        exact_find: Vec::new(),
        hierarchies: &[],
        statuses: BASIC_STATUSES,
        stats: &["tripType", "status", "payment"],
        required: &["tripType"],
    }
}

const VISA_COUNTRY_TYPES: &[(&str, &[&str])] = &[
    ("UAE", &["Tourist 30 Days", "Tourist 60 Days", "Transit 96 Hours"]),
    ("Saudi Arabia", &["Umrah", "Family Visit", "Business"]),
    ("Qatar", &["Tourist", "Business"]),
    ("Oman", &["Tourist 10 Days", "Tourist 30 Days"]),
    ("Schengen", &["Short Stay", "Business"]),
];

const STICKER_VISA_LINKS: &[HierarchyLink] = &[HierarchyLink {
    parent: "country",
    child: "visaType",
    options: VISA_COUNTRY_TYPES,
}];

const STICKER_VISA_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "country", key: "country", label: "Country" },
    ClassificationField { api_key: "visaType", key: "visaType", label: "Visa Type" },
    ClassificationField { api_key: "nationality", key: "nationality", label: "Nationality" },
];

const STICKER_VISA_STATUSES: &[Status] = &[
    Status::Pending,
    Status::Received,
    Status::Approved,
    Status::Rejected,
    Status::Dispatched,
];

fn sticker_visa_schema() -> EnquirySchema {
    let countries = STICKER_VISA_LINKS[0].parents();
    EnquirySchema {
        kind: EnquiryKind::StickerVisa,
        title: "Sticker Visa Enquiries",
        resource: "sticker-visa/enquiry",
        fields: STICKER_VISA_FIELDS,
        filters: vec![
            FilterField::new("country", "Country", "Select Country", &countries),
            FilterField::dependent("visaType", "Visa Type", "Select Visa Type"),
            status_filter(STICKER_VISA_STATUSES),
            payment_filter(),
        ],
        exact_find: vec![
            FilterField::new("country", "Country", "Select Country", &countries),
            FilterField::dependent("visaType", "Visa Type", "Select Visa Type"),
        ],
        hierarchies: STICKER_VISA_LINKS,
        statuses: STICKER_VISA_STATUSES,
        stats: &["country", "visaType", "status", "payment"],
        required: &["country", "visaType"],
    }
}

const HRD_CATEGORY_GROUPS: &[(&str, &[&str])] = &[
    ("Personal Documents", &["Civil Records", "Identity Documents"]),
    ("Educational Documents", &["School", "University", "Professional"]),
    ("Commercial Documents", &["Company Records", "Trade Documents"]),
];

const HRD_GROUP_TYPES: &[(&str, &[&str])] = &[
    ("Civil Records", &["Birth Certificate", "Marriage Certificate", "Death Certificate"]),
    ("Identity Documents", &["Police Clearance", "Affidavit"]),
    ("School", &["SSLC", "Higher Secondary Certificate"]),
    ("University", &["Degree Certificate", "Transcript", "Provisional Certificate"]),
    ("Professional", &["Diploma", "Nursing Registration", "Engineering Registration"]),
    ("Company Records", &["Certificate of Incorporation", "Power of Attorney"]),
    ("Trade Documents", &["Certificate of Origin", "Commercial Invoice"]),
];

const HRD_LINKS: &[HierarchyLink] = &[
    HierarchyLink { parent: "category", child: "group", options: HRD_CATEGORY_GROUPS },
    HierarchyLink { parent: "group", child: "docType", options: HRD_GROUP_TYPES },
];

const HRD_STATES: &[&str] = &[
    "Kerala",
    "Tamil Nadu",
    "Karnataka",
    "Maharashtra",
    "Andhra Pradesh",
    "Telangana",
    "Delhi",
];

const HRD_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "category", key: "category", label: "Category" },
    ClassificationField { api_key: "group", key: "group", label: "Group" },
    ClassificationField { api_key: "docType", key: "docType", label: "Document Type" },
    ClassificationField { api_key: "state", key: "state", label: "State" },
    ClassificationField { api_key: "noOfDocuments", key: "noOfDocuments", label: "Documents" },
];

const HRD_STATUSES: &[Status] = &[
    Status::Pending,
    Status::Received,
    Status::Approved,
    Status::Rejected,
    Status::Dispatched,
];

fn hrd_schema() -> EnquirySchema {
    let categories = HRD_LINKS[0].parents();
    EnquirySchema {
        kind: EnquiryKind::HrdAttestation,
        title: "HRD Attestation Enquiries",
        resource: "hrd/hrd-attestation/enquiry",
        fields: HRD_FIELDS,
        filters: vec![
            FilterField::new("category", "Category", "Select Category", &categories),
            FilterField::dependent("group", "Group", "Select Group"),
            FilterField::dependent("docType", "Document Type", "Select Document Type"),
            status_filter(HRD_STATUSES),
            payment_filter(),
        ],
        exact_find: vec![
            FilterField::new("category", "Category", "Select Category", &categories),
            FilterField::dependent("group", "Group", "Select Group"),
            FilterField::dependent("docType", "Document Type", "Select Document Type"),
            FilterField::new("state", "State", "Select State", HRD_STATES),
        ],
        hierarchies: HRD_LINKS,
        statuses: HRD_STATUSES,
        stats: &["category", "state", "status", "payment"],
        required: &["category", "group", "docType"],
    }
}

const ASSISTANT_SERVICES: &[&str] = &["Appointment Booking", "Form Filling", "Document Pickup", "Consultation"];
const ASSISTANT_COUNTRIES: &[&str] = &["India", "UAE", "Saudi Arabia", "Qatar", "United Kingdom"];

const ASSISTANT_FIELDS: &[ClassificationField] = &[
    ClassificationField { api_key: "service", key: "service", label: "Service" },
    ClassificationField { api_key: "country", key: "country", label: "Country" },
    ClassificationField { api_key: "appointmentDate", key: "appointmentDate", label: "Appointment" },
];

const ASSISTANT_STATUSES: &[Status] = &[Status::Pending, Status::Approved, Status::Rejected];

fn assistant_schema() -> EnquirySchema {
    EnquirySchema {
        kind: EnquiryKind::Assistant,
        title: "Assistant & Appointment Enquiries",
        resource: "assistant/enquiry",
        fields: ASSISTANT_FIELDS,
        filters: vec![
            FilterField::new("service", "Service", ALL, ASSISTANT_SERVICES),
            FilterField::new("country", "Country", ALL, ASSISTANT_COUNTRIES),
            status_filter(ASSISTANT_STATUSES),
            payment_filter(),
        ],
        exact_find: vec![
            FilterField::new("service", "Service", "Select Service", ASSISTANT_SERVICES),
            FilterField::new("country", "Country", "Select Country", ASSISTANT_COUNTRIES),
        ],
        hierarchies: &[],
        statuses: ASSISTANT_STATUSES,
        stats: &["service", "country", "status", "payment"],
        required: &["service"],
    }
}
