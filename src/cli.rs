// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::core::{AppConfig, FsOps};
use crate::editors::{
    CertificateEdit, CertificatePatch, EducationEdit, EducationPatch, LanguageEdit, LanguagePatch,
    PersonalField, PersonalInfoEdit, Section, SkillEdit, SkillPatch, SummaryEdit,
    WorkExperienceEdit, WorkExperiencePatch, WorkList,
};
use crate::export::{ExportPipeline, Rasterizer, TypstRasterizer};
use crate::labels::{Labels, Locale};
use crate::preview::to_text;
use crate::shell::{Edit, NoticeLevel, Shell};
use crate::storage::{DurableSlot, FileSlot, Persistence};
use crate::types::{Proficiency, SkillCategory, SkillLevel};

#[derive(Parser)]
#[command(name = "cv-builder")]
#[command(about = "Build a CV section by section, preview it and export it as PDF or JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Display language of the preview and PDF (en, az)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the rendered CV
    Preview,
    /// Print the form view of one section
    Show { section: Section },
    /// Edit personal information
    #[command(subcommand)]
    Personal(PersonalCommand),
    /// Edit the professional summary
    #[command(subcommand)]
    Summary(SummaryCommand),
    /// Edit work experience entries
    #[command(subcommand)]
    Experience(ExperienceCommand),
    /// Edit education entries
    #[command(subcommand)]
    Education(EducationCommand),
    /// Edit skills
    #[command(subcommand)]
    Skills(SkillsCommand),
    /// Edit certificates and courses
    #[command(subcommand)]
    Certificates(CertificatesCommand),
    /// Edit languages
    #[command(subcommand)]
    Languages(LanguagesCommand),
    /// Write the document as {name}_data.json into the output directory
    ExportJson,
    /// Replace the document with a previously exported JSON file
    ImportJson { file: PathBuf },
    /// Write the rendered CV as {name}_Resume.pdf into the output directory
    ExportPdf,
}

#[derive(Subcommand)]
pub enum PersonalCommand {
    /// Set one field: name, phone, email, address, linkedin, github
    Set { field: PersonalField, value: String },
    /// Store an image file as the profile photo
    Photo { path: PathBuf },
    /// Remove the profile photo
    ClearPhoto,
}

#[derive(Subcommand)]
pub enum SummaryCommand {
    Set { text: String },
}

#[derive(Subcommand)]
pub enum ExperienceCommand {
    Add,
    Update {
        id: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        current: Option<bool>,
    },
    Remove { id: String },
    /// Append an empty row to responsibilities or achievements
    AddItem { id: String, list: WorkList },
    SetItem {
        id: String,
        list: WorkList,
        index: usize,
        value: String,
    },
    /// Remove a row; the last row of a list is kept
    RemoveItem { id: String, list: WorkList, index: usize },
}

#[derive(Subcommand)]
pub enum EducationCommand {
    Add,
    Update {
        id: String,
        #[arg(long)]
        school: Option<String>,
        #[arg(long)]
        degree: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Remove { id: String },
    /// Append an empty honors/certifications row
    AddItem { id: String },
    SetItem { id: String, index: usize, value: String },
    RemoveItem { id: String, index: usize },
}

#[derive(Subcommand)]
pub enum SkillsCommand {
    Add { category: SkillCategory },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<SkillCategory>,
        #[arg(long)]
        level: Option<SkillLevel>,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum CertificatesCommand {
    Add,
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        issuer: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// An empty value removes the link
        #[arg(long)]
        url: Option<String>,
    },
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum LanguagesCommand {
    Add,
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        proficiency: Option<Proficiency>,
    },
    Remove { id: String },
}

// ===== Command -> Edit =====

impl From<SummaryCommand> for Edit {
    fn from(command: SummaryCommand) -> Self {
        match command {
            SummaryCommand::Set { text } => Edit::Summary(SummaryEdit::Set(text)),
        }
    }
}

impl From<ExperienceCommand> for Edit {
    fn from(command: ExperienceCommand) -> Self {
        let edit = match command {
            ExperienceCommand::Add => WorkExperienceEdit::Add,
            ExperienceCommand::Update {
                id,
                company,
                position,
                start,
                end,
                current,
            } => WorkExperienceEdit::Update {
                id,
                patch: WorkExperiencePatch {
                    company,
                    position,
                    start_date: start,
                    end_date: end,
                    current,
                },
            },
            ExperienceCommand::Remove { id } => WorkExperienceEdit::Remove { id },
            ExperienceCommand::AddItem { id, list } => WorkExperienceEdit::AddItem { id, list },
            ExperienceCommand::SetItem {
                id,
                list,
                index,
                value,
            } => WorkExperienceEdit::UpdateItem {
                id,
                list,
                index,
                value,
            },
            ExperienceCommand::RemoveItem { id, list, index } => {
                WorkExperienceEdit::RemoveItem { id, list, index }
            }
        };
        Edit::WorkExperience(edit)
    }
}

impl From<EducationCommand> for Edit {
    fn from(command: EducationCommand) -> Self {
        let edit = match command {
            EducationCommand::Add => EducationEdit::Add,
            EducationCommand::Update {
                id,
                school,
                degree,
                start,
                end,
            } => EducationEdit::Update {
                id,
                patch: EducationPatch {
                    school,
                    degree,
                    start_date: start,
                    end_date: end,
                },
            },
            EducationCommand::Remove { id } => EducationEdit::Remove { id },
            EducationCommand::AddItem { id } => EducationEdit::AddCertification { id },
            EducationCommand::SetItem { id, index, value } => {
                EducationEdit::UpdateCertification { id, index, value }
            }
            EducationCommand::RemoveItem { id, index } => {
                EducationEdit::RemoveCertification { id, index }
            }
        };
        Edit::Education(edit)
    }
}

impl From<SkillsCommand> for Edit {
    fn from(command: SkillsCommand) -> Self {
        let edit = match command {
            SkillsCommand::Add { category } => SkillEdit::Add { category },
            SkillsCommand::Update {
                id,
                name,
                category,
                level,
            } => SkillEdit::Update {
                id,
                patch: SkillPatch {
                    name,
                    category,
                    level,
                },
            },
            SkillsCommand::Remove { id } => SkillEdit::Remove { id },
        };
        Edit::Skills(edit)
    }
}

impl From<CertificatesCommand> for Edit {
    fn from(command: CertificatesCommand) -> Self {
        let edit = match command {
            CertificatesCommand::Add => CertificateEdit::Add,
            CertificatesCommand::Update {
                id,
                name,
                issuer,
                date,
                url,
            } => CertificateEdit::Update {
                id,
                patch: CertificatePatch {
                    name,
                    issuer,
                    date,
                    url: url.map(|url| (!url.trim().is_empty()).then_some(url)),
                },
            },
            CertificatesCommand::Remove { id } => CertificateEdit::Remove { id },
        };
        Edit::Certificates(edit)
    }
}

impl From<LanguagesCommand> for Edit {
    fn from(command: LanguagesCommand) -> Self {
        let edit = match command {
            LanguagesCommand::Add => LanguageEdit::Add,
            LanguagesCommand::Update {
                id,
                name,
                proficiency,
            } => LanguageEdit::Update {
                id,
                patch: LanguagePatch { name, proficiency },
            },
            LanguagesCommand::Remove { id } => LanguageEdit::Remove { id },
        };
        Edit::Languages(edit)
    }
}

// ===== Dispatch =====

pub fn open_shell(config: &AppConfig, locale: Locale) -> Result<Shell<FileSlot, TypstRasterizer>> {
    let labels = Labels::load(locale, config.labels_file.as_deref())?;
    let persistence = Persistence::new(FileSlot::new(&config.storage_dir), config.slot_key.clone());
    let pipeline = ExportPipeline::new(
        TypstRasterizer::new(&config.typst_binary),
        config.pdf.clone(),
    );

    Ok(Shell::open(persistence, pipeline, labels)
        .with_saved_hold(config.saved_hold()))
}

pub async fn handle_command(cli: Cli, config: AppConfig) -> Result<ExitCode> {
    let locale = cli.locale.unwrap_or(config.locale);
    let mut shell = open_shell(&config, locale)?;
    info!("Session opened with locale {}", locale);

    if run(&mut shell, cli.command, &config).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Run one command against an open session and print its notices.
/// Returns `false` when a blocking notice was raised.
pub async fn run<S: DurableSlot, R: Rasterizer>(
    shell: &mut Shell<S, R>,
    command: Command,
    config: &AppConfig,
) -> Result<bool> {
    match command {
        Command::Preview => print!("{}", to_text(&shell.preview())),
        Command::Show { section } => {
            shell.select(section);
            print!("{}", shell.active_view());
        }
        Command::Personal(PersonalCommand::Photo { path }) => {
            shell.attach_photo(&path)?;
            print!("{}", shell.active_view());
        }
        Command::Personal(PersonalCommand::Set { field, value }) => {
            edit(shell, Edit::PersonalInfo(PersonalInfoEdit::Set { field, value }))
        }
        Command::Personal(PersonalCommand::ClearPhoto) => {
            edit(shell, Edit::PersonalInfo(PersonalInfoEdit::ClearPhoto))
        }
        Command::Summary(command) => edit(shell, command.into()),
        Command::Experience(command) => edit(shell, command.into()),
        Command::Education(command) => edit(shell, command.into()),
        Command::Skills(command) => edit(shell, command.into()),
        Command::Certificates(command) => edit(shell, command.into()),
        Command::Languages(command) => edit(shell, command.into()),
        Command::ExportJson => {
            let path = shell.export_json().write_to(&config.output_dir)?;
            println!("✓ Exported {}", path.display());
        }
        Command::ImportJson { file } => {
            let bytes = FsOps::read_bytes_safe(&file)?;
            if shell.import_json(&bytes) {
                println!("✓ Imported {}", file.display());
            }
        }
        Command::ExportPdf => {
            if let Some(artifact) = shell.export_pdf().await {
                let path = artifact.write_to(&config.output_dir)?;
                println!("✓ Exported {}", path.display());
            }
        }
    }

    Ok(report_notices(shell))
}

fn edit<S: DurableSlot, R: Rasterizer>(shell: &mut Shell<S, R>, edit: Edit) {
    if !shell.apply(edit) {
        eprintln!("Nothing changed");
    }
    print!("{}", shell.active_view());
}

fn report_notices<S: DurableSlot, R: Rasterizer>(shell: &mut Shell<S, R>) -> bool {
    let mut blocked = false;
    for notice in shell.take_notices() {
        let level = match notice.level {
            NoticeLevel::Warning => "warning",
            NoticeLevel::Blocking => {
                blocked = true;
                "error"
            }
        };
        eprintln!("{} [{}]: {}", level, notice.code, notice.message);
    }

    !blocked
}
