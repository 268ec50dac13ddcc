use crate::domain::project::CharityProject;
use crate::error::Result;
use chrono::TimeDelta;
use std::io::Write;

const REPORT_HEADER: [&str; 3] = ["name", "collection_time", "description"];

/// Writes the closed-projects ranking as `name,collection_time,description`.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// `projects` are expected closed and already ranked; open ones are skipped.
    pub fn write_completion(&mut self, projects: &[CharityProject]) -> Result<()> {
        self.writer.write_record(REPORT_HEADER)?;
        for project in projects {
            let Some(close_date) = project.funding.close_date() else {
                continue;
            };
            let collection_time = format_collection_time(close_date - project.funding.create_date());
            self.writer.write_record([
                project.name.as_str(),
                collection_time.as_str(),
                project.description.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders a duration as `H:MM:SS`, prefixed with `N day(s), ` past one day.
pub fn format_collection_time(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}
