//! The interactive planner.
//!
//! One controller owns every piece of mutable state (session gate, feature
//! board, reference month) and the screens mutate it only through the gate
//! and board operations. Screens are plain prompt loops; rendering helpers
//! live in [`render`] so they stay testable.
//!
//! Prompts are strictly sequential, so at most one auth call is ever in
//! flight; there is no queuing or cancellation to manage.

pub mod render;

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use inquire::validator::MinLengthValidator;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use uuid::Uuid;

use crate::auth::{AuthBackend, Gate, DEMO_EMAIL};
use crate::board::Board;
use crate::calendar::{self, Week};
use crate::models::{Bucket, FeatureDraft, Priority, SignUpOutcome};

/// Top-level controller for one planner run.
pub struct Planner {
    gate: Gate,
    board: Board,
    reference: NaiveDate,
    demo: bool,
}

enum Outcome {
    Continue,
    Quit,
}

impl Planner {
    pub fn new(backend: Arc<dyn AuthBackend>, demo: bool) -> Self {
        Self {
            gate: Gate::new(backend),
            board: Board::seeded(),
            reference: Local::now().date_naive(),
            demo,
        }
    }

    /// Run until the user quits. Auth failures are printed verbatim and
    /// the loop keeps going; nothing here is fatal.
    pub async fn run(&mut self) -> Result<()> {
        self.gate.resolve().await?;
        loop {
            let was_authenticated = self.gate.session().is_some();
            self.gate.absorb_external();
            if was_authenticated && self.gate.session().is_none() {
                // The service ended the session on its own. Planner state
                // is session-scoped, so the next identity starts fresh.
                self.board = Board::seeded();
            }

            let outcome = if self.gate.session().is_some() {
                self.month_screen().await?
            } else {
                self.auth_screen().await?
            };
            if matches!(outcome, Outcome::Quit) {
                return Ok(());
            }
        }
    }

    // ============================================================
    // Auth screen
    // ============================================================

    async fn auth_screen(&mut self) -> Result<Outcome> {
        println!("\nSKU Calendar \u{2014} team feature planning");
        if self.demo {
            println!(
                "Demo mode: no auth service configured; set SUPABASE_URL and \
                 SUPABASE_ANON_KEY to enable accounts."
            );
        }

        let mut choices = Vec::new();
        if self.demo {
            choices.push(AuthChoice::ContinueAsDemo);
        }
        choices.push(AuthChoice::SignIn);
        choices.push(AuthChoice::SignUp);
        choices.push(AuthChoice::Quit);

        let Some(choice) = prompt_or_back(Select::new("Welcome", choices).prompt())? else {
            return Ok(Outcome::Quit);
        };
        match choice {
            AuthChoice::ContinueAsDemo => {
                if let Err(err) = self.gate.sign_in(DEMO_EMAIL, "").await {
                    println!("{err}");
                }
            }
            AuthChoice::SignIn => self.sign_in_form().await?,
            AuthChoice::SignUp => self.sign_up_form().await?,
            AuthChoice::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    async fn sign_in_form(&mut self) -> Result<()> {
        let Some(email) = prompt_or_back(Text::new("Email:").prompt())? else {
            return Ok(());
        };
        let Some(password) = prompt_or_back(
            Password::new("Password:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .without_confirmation()
                .prompt(),
        )?
        else {
            return Ok(());
        };

        if let Err(err) = self.gate.sign_in(&email, &password).await {
            println!("{err}");
        }
        Ok(())
    }

    async fn sign_up_form(&mut self) -> Result<()> {
        let Some(name) = prompt_or_back(Text::new("Name:").prompt())? else {
            return Ok(());
        };
        let Some(email) = prompt_or_back(Text::new("Email:").prompt())? else {
            return Ok(());
        };
        let Some(password) = prompt_or_back(
            Password::new("Password:")
                .with_display_mode(PasswordDisplayMode::Masked)
                .with_validator(MinLengthValidator::new(6))
                .prompt(),
        )?
        else {
            return Ok(());
        };

        match self.gate.sign_up(&email, &password, &name).await {
            Ok(SignUpOutcome::Session(_)) => {}
            Ok(SignUpOutcome::ConfirmationRequired) => {
                println!("Check your email for the confirmation link!");
            }
            Err(err) => println!("{err}"),
        }
        Ok(())
    }

    // ============================================================
    // Month screen
    // ============================================================

    async fn month_screen(&mut self) -> Result<Outcome> {
        let weeks = calendar::weeks_in_month(self.reference);
        println!(
            "\n{}",
            render::month_table(self.reference, &weeks, &self.board)
        );

        let mut choices: Vec<MonthChoice> = weeks
            .iter()
            .enumerate()
            .map(|(index, week)| MonthChoice::Week(index, week_label(week)))
            .collect();
        choices.push(MonthChoice::NextMonth);
        choices.push(MonthChoice::PreviousMonth);
        choices.push(MonthChoice::SignOut);
        choices.push(MonthChoice::Quit);

        let Some(choice) =
            prompt_or_back(Select::new("Select a week for feature planning", choices).prompt())?
        else {
            return Ok(Outcome::Quit);
        };
        match choice {
            MonthChoice::Week(index, _) => {
                let week = weeks[index].clone();
                self.week_screen(&week)?;
            }
            MonthChoice::NextMonth => self.reference = calendar::step_month(self.reference, 1),
            MonthChoice::PreviousMonth => self.reference = calendar::step_month(self.reference, -1),
            MonthChoice::SignOut => {
                match self.gate.sign_out().await {
                    // The board is session-scoped: drop it with the session.
                    Ok(()) => self.board = Board::seeded(),
                    Err(err) => println!("{err}"),
                }
            }
            MonthChoice::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    // ============================================================
    // Week and bucket screens
    // ============================================================

    fn week_screen(&mut self, week: &Week) -> Result<()> {
        loop {
            println!("\n{}", render::week_header(week));
            let mut choices: Vec<WeekChoice> = Bucket::ALL
                .iter()
                .map(|bucket| WeekChoice::Tab(*bucket, self.board.len(*bucket)))
                .collect();
            choices.push(WeekChoice::Back);

            let Some(choice) = prompt_or_back(Select::new("Bucket", choices).prompt())? else {
                return Ok(());
            };
            match choice {
                WeekChoice::Tab(bucket, _) => self.bucket_screen(bucket)?,
                WeekChoice::Back => return Ok(()),
            }
        }
    }

    fn bucket_screen(&mut self, bucket: Bucket) -> Result<()> {
        loop {
            println!("\n{}", render::bucket_table(bucket, self.board.list(bucket)));
            let message = format!("{} features", bucket.as_str());
            let Some(choice) = prompt_or_back(
                Select::new(
                    &message,
                    vec![BucketChoice::Add, BucketChoice::Delete, BucketChoice::Back],
                )
                .prompt(),
            )?
            else {
                return Ok(());
            };
            match choice {
                BucketChoice::Add => self.add_feature(bucket)?,
                BucketChoice::Delete => self.delete_feature(bucket)?,
                BucketChoice::Back => return Ok(()),
            }
        }
    }

    fn add_feature(&mut self, bucket: Bucket) -> Result<()> {
        let Some(name) = prompt_or_back(Text::new("Feature name:").prompt())? else {
            return Ok(());
        };
        let Some(description) = prompt_or_back(Text::new("Description:").prompt())? else {
            return Ok(());
        };
        let Some(priority) = prompt_or_back(
            Select::new("Priority", Priority::ALL.to_vec())
                .with_starting_cursor(1)
                .prompt(),
        )?
        else {
            return Ok(());
        };

        let draft = FeatureDraft {
            name,
            description: Some(description).filter(|d| !d.trim().is_empty()),
            priority,
        };
        // A blank name is dropped silently; the bucket stays as it was.
        let _ = self.board.add(bucket, draft);
        Ok(())
    }

    fn delete_feature(&mut self, bucket: Bucket) -> Result<()> {
        if self.board.list(bucket).is_empty() {
            println!("Nothing to delete.");
            return Ok(());
        }

        let choices: Vec<FeatureChoice> = self
            .board
            .list(bucket)
            .iter()
            .map(|feature| FeatureChoice {
                id: feature.id,
                label: format!("{} [{} priority]", feature.name, feature.priority.as_str()),
            })
            .collect();

        let Some(choice) = prompt_or_back(Select::new("Delete which feature?", choices).prompt())?
        else {
            return Ok(());
        };
        self.board.delete(bucket, choice.id);
        Ok(())
    }
}

// ============================================================
// Menu choices
// ============================================================

enum AuthChoice {
    ContinueAsDemo,
    SignIn,
    SignUp,
    Quit,
}

impl fmt::Display for AuthChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ContinueAsDemo => "Continue as demo user",
            Self::SignIn => "Sign in",
            Self::SignUp => "Sign up",
            Self::Quit => "Quit",
        })
    }
}

enum MonthChoice {
    Week(usize, String),
    NextMonth,
    PreviousMonth,
    SignOut,
    Quit,
}

impl fmt::Display for MonthChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week(_, label) => f.write_str(label),
            Self::NextMonth => f.write_str("Next month"),
            Self::PreviousMonth => f.write_str("Previous month"),
            Self::SignOut => f.write_str("Sign out"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

enum WeekChoice {
    Tab(Bucket, usize),
    Back,
}

impl fmt::Display for WeekChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab(bucket, count) => write!(f, "{} ({})", bucket.as_str(), count),
            Self::Back => f.write_str("Back to weeks"),
        }
    }
}

enum BucketChoice {
    Add,
    Delete,
    Back,
}

impl fmt::Display for BucketChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "Add feature",
            Self::Delete => "Delete feature",
            Self::Back => "Back",
        })
    }
}

struct FeatureChoice {
    id: Uuid,
    label: String,
}

impl fmt::Display for FeatureChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn week_label(week: &Week) -> String {
    format!(
        "Week {} ({})",
        calendar::week_number(week.start),
        calendar::format_week_range(week)
    )
}

/// Map prompt cancellation (Esc, Ctrl-C) to "go back" instead of an error.
fn prompt_or_back<T>(result: Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
