use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use referral_store::{BlobStorage, Tracker};
use shared_types::{
    ContactTag, ContactsResponse, FilterCriteria, FilterForm, ReferralContact, ReferralStatus,
    Stage, TrackedContact,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a contact to the end of the list
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        company: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Edit the contact at POSITION; omitted fields keep their current value
    Update {
        position: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
        /// Drop every tag before applying --tag
        #[arg(long)]
        clear_tags: bool,
    },
    /// Delete the contact at POSITION
    Remove { position: usize },
    /// List contacts, optionally filtered
    List(ListArgs),
    /// Print every field of the contact at POSITION
    Show { position: usize },
    /// Print the stored blob for the current list
    Export,
    /// Manage the passphrase kept in the OS keychain
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeyAction {
    /// Store the blob passphrase in the keychain
    Set { passphrase: String },
    /// Remove the blob passphrase from the keychain
    Clear,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long)]
    pub stage: Option<Stage>,
    #[arg(long = "status")]
    pub referral_status: Option<ReferralStatus>,
    #[arg(long)]
    pub details: Option<String>,
    /// Referral message; left empty, the default template is used
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long = "tag")]
    pub tags: Vec<ContactTag>,
}

impl FieldArgs {
    fn apply(self, contact: &mut ReferralContact) {
        if let Some(stage) = self.stage {
            contact.stage = stage;
        }
        if let Some(status) = self.referral_status {
            contact.referral_status = status;
        }
        if let Some(details) = self.details {
            contact.contact_details = details;
        }
        if let Some(message) = self.message {
            contact.referral_message = message;
        }
        contact.tags.extend(self.tags);
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long, default_value = "")]
    pub stage: String,
    #[arg(long = "status", default_value = "")]
    pub referral_status: String,
    #[arg(long, default_value = "")]
    pub tag: String,
    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn criteria(&self) -> Result<FilterCriteria> {
        let form = FilterForm {
            name: self.name.clone(),
            company: self.company.clone(),
            stage: self.stage.clone(),
            referral_status: self.referral_status.clone(),
            tag: self.tag.clone(),
        };
        FilterCriteria::try_from(form).context("Invalid filter")
    }
}

/// Runs a contact command against `tracker` and returns the text to print.
pub fn run<S: BlobStorage>(tracker: &mut Tracker<S>, command: Command) -> Result<String> {
    match command {
        Command::Add {
            name,
            company,
            fields,
        } => {
            let mut contact = ReferralContact::new(name, company);
            fields.apply(&mut contact);
            let id = tracker.add(contact).context("Failed to add contact")?;
            let position = tracker.store().position_of(id).unwrap_or_default();
            Ok(format!("Added contact #{position} ({id})"))
        }
        Command::Update {
            position,
            name,
            company,
            fields,
            clear_tags,
        } => {
            let current = tracker
                .contacts()
                .get(position)
                .ok_or_else(|| anyhow::anyhow!("No contact at position {position}"))?;
            let mut contact = current.contact.clone();
            if let Some(name) = name {
                contact.name = name;
            }
            if let Some(company) = company {
                contact.company = company;
            }
            if clear_tags {
                contact.tags.clear();
            }
            fields.apply(&mut contact);

            tracker
                .update(position, contact)
                .context("Failed to update contact")?;
            Ok(format!("Updated contact #{position}"))
        }
        Command::Remove { position } => {
            let removed = tracker
                .remove(position)
                .context("Failed to remove contact")?;
            Ok(format!(
                "Removed {} ({})",
                removed.contact.name, removed.contact.company
            ))
        }
        Command::List(args) => {
            let criteria = args.criteria()?;
            let matches = tracker.filter(&criteria);
            if args.json {
                let response = ContactsResponse {
                    contacts: matches.into_iter().cloned().collect(),
                };
                return Ok(serde_json::to_string_pretty(&response)?);
            }
            Ok(render_table(tracker, &matches))
        }
        Command::Show { position } => {
            let tracked = tracker
                .contacts()
                .get(position)
                .ok_or_else(|| anyhow::anyhow!("No contact at position {position}"))?;
            Ok(render_details(position, tracked))
        }
        Command::Export => Ok(tracker.export()?),
        Command::Key { .. } => anyhow::bail!("Key commands do not operate on contacts"),
    }
}

fn render_tags(contact: &ReferralContact) -> String {
    contact
        .tags
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_table<S: BlobStorage>(tracker: &Tracker<S>, matches: &[&TrackedContact]) -> String {
    if matches.is_empty() {
        return "No contacts found".to_string();
    }

    let mut out = format!(
        "{:<5}{:<24}{:<24}{:<18}{:<14}{}",
        "#", "Name", "Company", "Stage", "Status", "Tags"
    );
    for tracked in matches {
        let position = tracker.store().position_of(tracked.id).unwrap_or_default();
        let contact = &tracked.contact;
        out.push_str(&format!(
            "\n{:<5}{:<24}{:<24}{:<18}{:<14}{}",
            position,
            contact.name,
            contact.company,
            contact.stage.label(),
            contact.referral_status.label(),
            render_tags(contact)
        ));
    }
    out
}

fn render_details(position: usize, tracked: &TrackedContact) -> String {
    let contact = &tracked.contact;
    format!(
        "#{position} {name} @ {company}\n\
         id:       {id}\n\
         stage:    {stage}\n\
         status:   {status}\n\
         tags:     {tags}\n\
         details:  {details}\n\
         message:\n{message}",
        name = contact.name,
        company = contact.company,
        id = tracked.id,
        stage = contact.stage,
        status = contact.referral_status,
        tags = render_tags(contact),
        details = contact.contact_details,
        message = contact.referral_message,
    )
}
