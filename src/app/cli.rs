use crate::model::enquiry::{Payment, Status};
use crate::model::schema::EnquiryKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "egs-admin",
    version,
    about = "Manage EGS enquiry tables from the terminal",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Serve built-in demo rows instead of calling the API; changes are not saved
    #[arg(long, global = true)]
    pub demo: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with one enquiry table
    Enquiries {
        /// pcc, translation, insurance, dummy-ticket, sticker-visa, hrd or assistant
        kind: EnquiryKind,

        #[command(subcommand)]
        action: TableCommand,
    },
    /// Sign in with a one-time code sent by email
    Login {
        email: String,

        /// Code from the email; prompted for when omitted
        #[arg(long)]
        code: Option<String>,
    },
    /// Show the signed-in user
    Whoami,
    /// Forget the stored token
    Logout,
    /// Upload a file to the media host and print its URL
    Upload { path: PathBuf },
    /// Submit a new enquiry the way the public forms do
    Submit(SubmitArgs),
}

#[derive(Subcommand, Debug)]
pub enum TableCommand {
    /// List one page of enquiries
    List {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Viewport height in px used to size the page
        #[arg(long)]
        viewport: Option<i64>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show counts per filter dimension
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show the options a filter currently offers
    Options {
        key: String,

        #[command(flatten)]
        filters: FilterArgs,
    },
    SetStatus { id: String, status: Status },
    SetPayment { id: String, payment: Payment },
    Delete { id: String },
    Edit { id: String },
    /// List the files attached to an enquiry
    Docs { id: String },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Free-text search over id, email, contact and classification fields
    #[arg(long)]
    pub search: Option<String>,

    /// Primary filter, e.g. --filter country=Russia (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub filters: Vec<(String, String)>,

    /// Exact-find value; any of these arms the exact-find block
    #[arg(long = "exact", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub exact: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    pub kind: EnquiryKind,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_pair)]
    pub fields: Vec<(String, String)>,

    /// Declared number of documents; defaults to the number of files
    #[arg(long)]
    pub documents: Option<u32>,

    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

pub fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
