use anyhow::Context;
use eyesfood_client::{
    api::{AdviceType, AuthToken, ExpertId, Recommendation, UserId},
    Viewer,
};

mod api;
mod commands;
mod screens;

lazy_static::lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

/// Everything a request needs to know about the session
///
/// Built once from the command line and handed to every api call.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginInfo {
    pub host: String,
    pub token: AuthToken,
    pub viewer: Viewer,
}

#[derive(structopt::StructOpt)]
struct Opt {
    /// Base url of the API, eg. https://api.example.org
    #[structopt(long)]
    host: String,

    /// User id of the logged-in user
    #[structopt(long)]
    user_id: Option<String>,

    /// Expert profile id of the logged-in user, if they are an expert
    #[structopt(long)]
    expert_id: Option<String>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List experts with their recommendation and comment counts
    Experts {
        /// Only show experts whose name contains this
        #[structopt(short, long, default_value = "")]
        search: String,
    },

    /// Show an expert's profile and the comments about them
    Expert {
        /// User id of the expert
        user_id: String,
    },

    /// Comment on experts
    Comment(CommentCmd),

    /// Health articles written by experts
    Articles(ArticlesCmd),

    /// Experts' advice about a food
    Advice(AdviceCmd),

    /// Expert profiles
    Profile(ProfileCmd),
}

#[derive(structopt::StructOpt)]
pub enum CommentCmd {
    /// Comment on an expert
    Add {
        /// User id of the expert
        expert: String,
        content: String,
        /// yes, no or undecided
        #[structopt(long, default_value = "undecided", parse(try_from_str = parse_recommendation))]
        recommendation: Recommendation,
    },

    /// Edit one of your comments
    Edit {
        id: String,
        #[structopt(long)]
        content: Option<String>,
        /// yes, no or undecided
        #[structopt(long, parse(try_from_str = parse_recommendation))]
        recommendation: Option<Recommendation>,
    },

    /// Delete one of your comments
    Delete { id: String },
}

#[derive(structopt::StructOpt)]
pub enum ArticlesCmd {
    List {
        /// Only list the articles you wrote
        #[structopt(long)]
        mine: bool,
    },
    Create {
        title: String,
        #[structopt(long, default_value = "")]
        description: String,
        #[structopt(long, default_value = "")]
        link: String,
    },
    Edit {
        id: String,
        #[structopt(long)]
        title: Option<String>,
        #[structopt(long)]
        description: Option<String>,
        #[structopt(long)]
        link: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(structopt::StructOpt)]
pub enum AdviceCmd {
    /// List the advice about a food
    List { food: String },
    Create {
        food: String,
        content: String,
        /// general, positive or negative
        #[structopt(long = "type", default_value = "general")]
        advice_type: AdviceType,
    },
    Edit {
        id: String,
        #[structopt(long)]
        content: Option<String>,
        #[structopt(long = "type")]
        advice_type: Option<AdviceType>,
    },
    Delete {
        id: String,
    },
}

#[derive(structopt::StructOpt)]
pub enum ProfileCmd {
    /// Show the expert profile of a user
    Show { user_id: String },

    /// Update your own expert profile
    Update {
        #[structopt(long)]
        address: Option<String>,
        #[structopt(long)]
        description: Option<String>,
        #[structopt(long)]
        phone: Option<String>,
        #[structopt(long)]
        web_page: Option<String>,
        #[structopt(long)]
        specialty: Option<String>,
        #[structopt(long)]
        coach: Option<bool>,
        #[structopt(long)]
        nutritionist: Option<bool>,
    },
}

fn parse_recommendation(s: &str) -> Result<Recommendation, String> {
    match &s.to_lowercase() as &str {
        "yes" | "true" => Ok(Recommendation::Recommended),
        "no" | "false" => Ok(Recommendation::NotRecommended),
        "undecided" | "null" => Ok(Recommendation::Undecided),
        _ => Err(format!("expected yes, no or undecided, got {s:?}")),
    }
}

fn auth_token() -> anyhow::Result<AuthToken> {
    let tok =
        std::env::var("EYESFOOD_TOKEN").context("retrieving EYESFOOD_TOKEN environment variable")?;
    Ok(AuthToken(tok))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let login = LoginInfo {
        host: opt.host.trim_end_matches('/').to_string(),
        token: auth_token()?,
        viewer: Viewer::new(opt.user_id.map(UserId), opt.expert_id.map(ExpertId)),
    };

    match opt.cmd {
        Command::Experts { search } => commands::list_experts(&login, &search).await,
        Command::Expert { user_id } => commands::show_expert(&login, &UserId(user_id)).await,
        Command::Comment(cmd) => commands::comment(&login, cmd).await,
        Command::Articles(cmd) => commands::articles(&login, cmd).await,
        Command::Advice(cmd) => commands::advice(&login, cmd).await,
        Command::Profile(cmd) => commands::profile(&login, cmd).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_flags() {
        assert_eq!(parse_recommendation("YES"), Ok(Recommendation::Recommended));
        assert_eq!(parse_recommendation("no"), Ok(Recommendation::NotRecommended));
        assert_eq!(parse_recommendation("undecided"), Ok(Recommendation::Undecided));
        assert!(parse_recommendation("maybe").is_err());
    }
}
