#![allow(dead_code)]

use egs_admin::config::ApiConfig;
use egs_admin::util::notifier::Notifier;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Initialize tracing for tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

pub fn api_config(server_uri: &str) -> ApiConfig {
    ApiConfig::default().with_base_url(format!("{server_uri}/api"))
}

/// Answers every confirmation with a fixed value and records what was shown.
pub struct RecordingNotifier {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self::answering(true))
    }

    pub fn declining() -> Arc<Self> {
        Arc::new(Self::answering(false))
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Three PCC enquiries as the backend returns them.
pub fn pcc_list_body() -> Value {
    json!({
        "count": 3,
        "items": [
            {
                "_id": "abc",
                "email": "user1@example.com",
                "phone": "+971500000001",
                "country": "Russia",
                "companyName": "Volga Trading",
                "noOfDocuments": 1,
                "documents": [
                    {"index": 0, "originalName": "pcc.pdf", "mimeType": "application/pdf", "size": 1200,
                     "url": "https://res.cloudinary.com/demo/image/upload/v1/pcc.pdf"}
                ],
                "createdAt": "2026-10-16T09:30:00.000Z",
                "status": "Pending",
                "payment": "Pending"
            },
            {
                "_id": "def",
                "email": "user2@example.com",
                "phone": "+971500000002",
                "country": "Serbia",
                "companyName": "Danube Logistics",
                "noOfDocuments": 1,
                "documents": [],
                "createdAt": "2026-10-15T08:00:00.000Z",
                "status": "approved",
                "payment": "paid"
            },
            {
                "_id": "ghi",
                "email": "user3@example.com",
                "phone": "+971500000003",
                "country": "Russia",
                "companyName": "Ural Metals",
                "noOfDocuments": 2,
                "createdAt": "2026-10-14T07:00:00.000Z"
            }
        ]
    })
}
