// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # caseload-cli
//!
//! Builds one role's caseload from a JSON snapshot of the external systems
//! and prints it as JSON or CSV.
//!
//! Licences come from the snapshot unless `--database` names a `SQLite`
//! licence store, in which case the store is read instead. `load-licences`
//! copies the snapshot's licences into that store.
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over `-v`/`-q`.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod output;
mod snapshot;

use caseload::{CaseloadService, CaseloadSettings, LicenceStore, Sources};
use caseload_domain::{DEFAULT_TIMEZONE, parse_iso_date, today_in};
use caseload_persistence::SqliteLicenceStore;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::eyre};
use output::{Format, render};
use snapshot::Snapshot;
use std::io::{self, Write};
use std::path::PathBuf;
use time::Date;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter())
        .with_writer(io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON snapshot of licences, prisoners, probation and HDC data
    #[arg(short, long)]
    snapshot: PathBuf,

    /// `SQLite` licence database to read licences from
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Date to build caseloads for (YYYY-MM-DD), defaults to today in Europe/London
    #[arg(long)]
    today: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        let snapshot = Snapshot::load(&self.snapshot)?;

        if matches!(self.command, Command::LoadLicences) {
            let path = self
                .database
                .ok_or_else(|| eyre!("load-licences requires --database"))?;
            let store = SqliteLicenceStore::new_with_file(&path)?;
            let ids = store.insert_licences(&snapshot.licences)?;
            info!(count = ids.len(), database = %path.display(), "Loaded licences");
            return Ok(());
        }

        let today = self.today()?;
        let calendar = snapshot.calendar(today)?;
        let database = self
            .database
            .as_deref()
            .map(SqliteLicenceStore::new_with_file)
            .transpose()?;
        let collaborators = snapshot.into_sources();
        let licences: &dyn LicenceStore = match &database {
            Some(store) => store,
            None => &collaborators.licences,
        };

        let service = CaseloadService::new(
            Sources {
                licences,
                prisoners: &collaborators.prisoners,
                probation: &collaborators.probation,
                hdc: &collaborators.hdc,
            },
            &calendar,
            CaseloadSettings::default(),
        );
        info!(%today, "Building caseload");

        self.command.run(&service, self.format, io::stdout().lock())
    }

    fn today(&self) -> Result<Date> {
        match &self.today {
            Some(value) => Ok(parse_iso_date(value)?),
            None => Ok(today_in(DEFAULT_TIMEZONE)?),
        }
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(self.log_level().into()))
    }
}

#[derive(Clone, Debug, clap::Args)]
struct PrisonScope {
    /// Prison code, repeatable
    #[arg(long = "prison", required = true)]
    prisons: Vec<String>,
}

#[derive(Clone, Debug, clap::Args)]
struct ComScope {
    /// Staff id of the probation practitioner
    #[arg(long, conflicts_with = "teams", required_unless_present = "teams")]
    staff_id: Option<i64>,

    /// Team code the user belongs to, repeatable
    #[arg(long = "team")]
    teams: Vec<String>,

    /// Team code selected in the view, repeatable
    #[arg(long = "selected-team", requires = "teams")]
    selected_teams: Vec<String>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Case administrator prison view
    #[command(visible_alias = "ca")]
    Prison {
        #[command(flatten)]
        scope: PrisonScope,
        /// Filter by name, prisoner number or practitioner name
        #[arg(long)]
        search: Option<String>,
    },

    /// Case administrator probation view
    Probation {
        #[command(flatten)]
        scope: PrisonScope,
        /// Filter by name, prisoner number or practitioner name
        #[arg(long)]
        search: Option<String>,
    },

    /// Licences a probation practitioner or team needs to create
    ComCreate(ComScope),

    /// Licences a probation practitioner or team may vary
    ComVary(ComScope),

    /// Submitted licences awaiting approval
    ApprovalNeeded(PrisonScope),

    /// Licences approved in the last 14 days
    RecentlyApproved(PrisonScope),

    /// Submitted variations awaiting approval
    VaryApprovals {
        /// Probation delivery unit code, repeatable
        #[arg(long = "pdu", conflicts_with = "region", required_unless_present = "region")]
        pdus: Vec<String>,
        /// Probation region (provider) code
        #[arg(long)]
        region: Option<String>,
        /// Filter by name, CRN or practitioner name
        #[arg(long)]
        search: Option<String>,
    },

    /// Offenders releasing within a week with no approved licence
    #[command(visible_alias = "lmh")]
    Handover(PrisonScope),

    /// Copy the snapshot's licences into the --database store
    LoadLicences,
}

impl Command {
    fn run<W: Write>(self, service: &CaseloadService<'_>, format: Format, out: W) -> Result<()> {
        match self {
            Self::Prison { scope, search } => render(
                &service.prison_omu_caseload(&scope.prisons, search.as_deref())?,
                format,
                out,
            ),
            Self::Probation { scope, search } => render(
                &service.probation_omu_caseload(&scope.prisons, search.as_deref())?,
                format,
                out,
            ),
            Self::ComCreate(scope) => {
                let cases = match scope.staff_id {
                    Some(staff_id) => service.staff_create_caseload(staff_id)?,
                    None => service.team_create_caseload(&scope.teams, &scope.selected_teams)?,
                };
                render(&cases, format, out)
            }
            Self::ComVary(scope) => {
                let cases = match scope.staff_id {
                    Some(staff_id) => service.staff_vary_caseload(staff_id)?,
                    None => service.team_vary_caseload(&scope.teams, &scope.selected_teams)?,
                };
                render(&cases, format, out)
            }
            Self::ApprovalNeeded(scope) => {
                render(&service.approval_needed(&scope.prisons)?, format, out)
            }
            Self::RecentlyApproved(scope) => {
                render(&service.recently_approved(&scope.prisons)?, format, out)
            }
            Self::VaryApprovals {
                pdus,
                region,
                search,
            } => {
                let cases = match region {
                    Some(region) => {
                        service.regional_vary_approver_caseload(&region, search.as_deref())?
                    }
                    None => service.vary_approver_caseload(&pdus, search.as_deref())?,
                };
                render(&cases, format, out)
            }
            Self::Handover(scope) => {
                render(&service.last_minute_handover(&scope.prisons)?, format, out)
            }
            Self::LoadLicences => Err(eyre!("load-licences does not build a caseload")),
        }
    }
}
