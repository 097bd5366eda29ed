//! Summary aggregation and HTML rendering.
//!
//! A closed set of summary generators behind a common capability trait:
//! each one folds the parsed records into its own container
//! (`accumulate`) and renders that container to an HTML table report
//! (`render`). The registry is an explicit list; there is no open-ended
//! plugin loading.

use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use handlebars::Handlebars;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::constants::{EXPIRED_TODO_BY_USER, TODO_BY_MODULE, UPCOMING_TODO_BY_USER};
use crate::error::{Error, Result};
use crate::models::TodoRecord;

/// Table report grouped by module: one section per file, rows carrying the
/// assignee.
const MODULE_REPORT_TEMPLATE: &str = "\
{{#each sections}}
<h3>TODOs for module {{heading}}</h3>
<p>
<table>
<tr>
    <th>User Name</th>
    <th>Message</th>
    <th>Line No.</th>
    <th>Completion Date</th>
</tr>
{{#each rows}}
<tr>
    <td>{{user}}</td>
    <td>{{message}}</td>
    <td>{{line_number}}</td>
    <td>{{due_date}}</td>
</tr>
{{/each}}
</table>
</p><br>
{{/each}}
";

/// Table report grouped by user: one section per assignee, rows carrying
/// the module.
const USER_REPORT_TEMPLATE: &str = "\
{{#each sections}}
<h3>{{heading}}</h3>
<p>
<table>
<tr>
    <th>Message</th>
    <th>Module</th>
    <th>Line No.</th>
    <th>Completion Date</th>
</tr>
{{#each rows}}
<tr>
    <td>{{message}}</td>
    <td>{{module}}</td>
    <td>{{line_number}}</td>
    <td>{{due_date}}</td>
</tr>
{{/each}}
</table>
</p><br>
{{/each}}
";

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    registry
        .register_template_string("module_report", MODULE_REPORT_TEMPLATE)
        .expect("module report template is valid");
    registry
        .register_template_string("user_report", USER_REPORT_TEMPLATE)
        .expect("user report template is valid");
    registry
});

#[derive(Debug, Clone, Serialize)]
struct SummaryRow {
    user: String,
    message: String,
    module: String,
    line_number: usize,
    due_date: String,
}

impl SummaryRow {
    fn from_record(record: &TodoRecord) -> Self {
        Self {
            user: record.assignee.name().to_string(),
            message: record.message.clone(),
            module: record.module.clone(),
            line_number: record.line_number,
            due_date: record.due_date.to_string(),
        }
    }
}

#[derive(Serialize)]
struct Section<'a> {
    heading: String,
    rows: &'a [SummaryRow],
}

fn render_sections(
    template: &str,
    sections: &IndexMap<String, Vec<SummaryRow>>,
    heading: impl Fn(&str) -> String,
) -> Result<String> {
    let sections: Vec<Section<'_>> = sections
        .iter()
        .map(|(key, rows)| Section {
            heading: heading(key.as_str()),
            rows,
        })
        .collect();
    Ok(TEMPLATES.render(template, &json!({ "sections": sections }))?)
}

/// Capability interface shared by all summary generators.
pub trait SummaryGenerator {
    /// Display name, also used as the report name when persisted.
    fn name(&self) -> &str;

    /// Folds a batch of parsed records into the generator's container.
    fn accumulate(&mut self, all_todos: &IndexMap<String, Vec<TodoRecord>>);

    /// Renders the accumulated container to HTML.
    fn render(&mut self) -> Result<()>;

    /// The rendered HTML; empty until [`render`](Self::render) ran.
    fn html(&self) -> &str;
}

/// Groups every record under its module (relative file path).
#[derive(Default)]
pub struct ByModuleSummary {
    sections: IndexMap<String, Vec<SummaryRow>>,
    html: String,
}

impl ByModuleSummary {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SummaryGenerator for ByModuleSummary {
    fn name(&self) -> &str {
        TODO_BY_MODULE
    }

    fn accumulate(&mut self, all_todos: &IndexMap<String, Vec<TodoRecord>>) {
        info!(generator = self.name(), "generating summary");
        for records in all_todos.values() {
            for record in records {
                self.sections
                    .entry(record.module.clone())
                    .or_default()
                    .push(SummaryRow::from_record(record));
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        self.html = render_sections("module_report", &self.sections, |module| module.to_string())?;
        Ok(())
    }

    fn html(&self) -> &str {
        &self.html
    }
}

/// Groups records whose due date has passed under their assignee.
///
/// The sentinel due date is in the far future and therefore never
/// classified as expired.
pub struct ExpiredTodosByUserSummary {
    today: NaiveDate,
    sections: IndexMap<String, Vec<SummaryRow>>,
    html: String,
}

impl ExpiredTodosByUserSummary {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Evaluates the window against a fixed date instead of the wall clock.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today,
            sections: IndexMap::new(),
            html: String::new(),
        }
    }
}

impl Default for ExpiredTodosByUserSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryGenerator for ExpiredTodosByUserSummary {
    fn name(&self) -> &str {
        EXPIRED_TODO_BY_USER
    }

    fn accumulate(&mut self, all_todos: &IndexMap<String, Vec<TodoRecord>>) {
        info!(generator = self.name(), "generating summary");
        for records in all_todos.values() {
            for record in records {
                if self.today > record.due_date {
                    self.sections
                        .entry(record.assignee.name().to_string())
                        .or_default()
                        .push(SummaryRow::from_record(record));
                }
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        self.html = render_sections("user_report", &self.sections, |user| {
            format!("Expired TODOs for {user}")
        })?;
        Ok(())
    }

    fn html(&self) -> &str {
        &self.html
    }
}

/// Groups records due within the next seven days under their assignee.
///
/// The sentinel due date is in the far future and therefore never
/// classified as upcoming.
pub struct UpcomingWeekTodosByUserSummary {
    today: NaiveDate,
    sections: IndexMap<String, Vec<SummaryRow>>,
    html: String,
}

impl UpcomingWeekTodosByUserSummary {
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Evaluates the window against a fixed date instead of the wall clock.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today,
            sections: IndexMap::new(),
            html: String::new(),
        }
    }
}

impl Default for UpcomingWeekTodosByUserSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryGenerator for UpcomingWeekTodosByUserSummary {
    fn name(&self) -> &str {
        UPCOMING_TODO_BY_USER
    }

    fn accumulate(&mut self, all_todos: &IndexMap<String, Vec<TodoRecord>>) {
        info!(generator = self.name(), "generating summary");
        for records in all_todos.values() {
            for record in records {
                let due_in = (record.due_date - self.today).num_days();
                if self.today <= record.due_date && due_in <= 7 {
                    self.sections
                        .entry(record.assignee.name().to_string())
                        .or_default()
                        .push(SummaryRow::from_record(record));
                }
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        self.html = render_sections("user_report", &self.sections, |user| {
            format!("Upcoming TODOs for {user}")
        })?;
        Ok(())
    }

    fn html(&self) -> &str {
        &self.html
    }
}

/// The default registry: by-module, expired-by-user and upcoming-week
/// summaries, in that order.
pub fn default_generators() -> Vec<Box<dyn SummaryGenerator>> {
    vec![
        Box::new(ByModuleSummary::new()),
        Box::new(ExpiredTodosByUserSummary::new()),
        Box::new(UpcomingWeekTodosByUserSummary::new()),
    ]
}

/// Builds generators by display name from the closed registry.
pub fn generators_by_name(names: &[String]) -> Result<Vec<Box<dyn SummaryGenerator>>> {
    names
        .iter()
        .map(|name| -> Result<Box<dyn SummaryGenerator>> {
            match name.as_str() {
                TODO_BY_MODULE => Ok(Box::new(ByModuleSummary::new())),
                EXPIRED_TODO_BY_USER => Ok(Box::new(ExpiredTodosByUserSummary::new())),
                UPCOMING_TODO_BY_USER => Ok(Box::new(UpcomingWeekTodosByUserSummary::new())),
                other => Err(Error::UnknownGenerator(other.to_string())),
            }
        })
        .collect()
}

/// Runs each generator over the parsed records, rendering HTML when
/// requested. A generator whose rendering fails is logged and skipped
/// without affecting the others.
pub fn generate_summaries(
    all_todos: &IndexMap<String, Vec<TodoRecord>>,
    generators: &mut [Box<dyn SummaryGenerator>],
    generate_html: bool,
) {
    for generator in generators.iter_mut() {
        generator.accumulate(all_todos);
        if generate_html {
            if let Err(err) = generator.render() {
                error!(generator = generator.name(), %err, "error generating summary");
            }
        }
    }
}
