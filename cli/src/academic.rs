use crate::context::Context;
use crate::context::GlobalArgs;
use crate::parse;
use campus_insights::grades;
use campus_insights::grades::GradeBand;
use campus_insights::planner;
use campus_insights::planner::DueUrgency;
use campus_store::Query;
use campus_store::RecordStoreExt;
use campus_store::records::Assignment;
use campus_store::records::Course;
use campus_store::records::Grade;
use campus_store::records::TimetableEntry;
use campus_store::records::new_id;
use chrono::DateTime;
use chrono::Datelike;
use chrono::NaiveTime;
use chrono::Utc;
use clap::Parser;
use std::collections::HashMap;

/// Courses, assignments, grades and the weekly timetable.
#[derive(Debug, Parser)]
pub struct AcademicCli {
    #[command(subcommand)]
    pub cmd: AcademicCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum AcademicCommand {
    #[command(subcommand)]
    Course(CourseCommand),
    #[command(subcommand)]
    Assignment(AssignmentCommand),
    #[command(subcommand)]
    Grade(GradeCommand),
    /// GPA, trend and per-assignment results for the current user.
    Grades,
    #[command(subcommand)]
    Timetable(TimetableCommand),
}

#[derive(Debug, clap::Subcommand)]
pub enum CourseCommand {
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        instructor: Option<String>,
    },
    List,
}

#[derive(Debug, clap::Subcommand)]
pub enum AssignmentCommand {
    Add {
        /// Course code, e.g. CS201.
        #[arg(long)]
        course: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// RFC 3339 or `YYYY-MM-DD[THH:MM]`; a bare date means 23:59 UTC.
        #[arg(long, value_parser = parse::datetime)]
        due: DateTime<Utc>,
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
        points: u32,
    },
    /// Upcoming assignments with a study plan for each.
    List,
}

#[derive(Debug, clap::Subcommand)]
pub enum GradeCommand {
    Add {
        /// Assignment id.
        #[arg(long)]
        assignment: String,
        /// Defaults to the current user.
        #[arg(long)]
        student: Option<String>,
        /// Leave out for work that has not been marked yet.
        #[arg(long)]
        score: Option<f64>,
        #[arg(long)]
        feedback: Option<String>,
        #[arg(long, value_parser = parse::datetime)]
        graded_at: Option<DateTime<Utc>>,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum TimetableCommand {
    Add {
        #[arg(long)]
        course: String,
        /// 1 (Monday) to 7 (Sunday), or a weekday name.
        #[arg(long, value_parser = parse::weekday)]
        day: u8,
        #[arg(long, value_parser = parse::time)]
        start: NaiveTime,
        #[arg(long, value_parser = parse::time)]
        end: NaiveTime,
        #[arg(long)]
        room: Option<String>,
    },
    /// Classes on one day, today by default.
    Show {
        #[arg(long, value_parser = parse::weekday)]
        day: Option<u8>,
    },
}

pub fn run(cli: AcademicCli, global: &GlobalArgs) -> anyhow::Result<()> {
    let ctx = Context::open(global)?;
    match cli.cmd {
        AcademicCommand::Course(cmd) => run_course(cmd, &ctx),
        AcademicCommand::Assignment(cmd) => run_assignment(cmd, &ctx),
        AcademicCommand::Grade(cmd) => run_grade(cmd, &ctx),
        AcademicCommand::Grades => show_grades(&ctx),
        AcademicCommand::Timetable(cmd) => run_timetable(cmd, &ctx),
    }
}

fn run_course(cmd: CourseCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        CourseCommand::Add {
            code,
            name,
            instructor,
        } => {
            if find_course(ctx, &code)?.is_some() {
                anyhow::bail!("course already exists: {code}");
            }
            let course = Course {
                id: new_id(),
                code,
                name,
                instructor,
                created_at: ctx.now,
            };
            ctx.store.insert(&course)?;
            tracing::info!(id = %course.id, code = %course.code, "saved course");
            println!("{}", course.id);
        }
        CourseCommand::List => {
            for course in ctx.store.fetch::<Course>(&Query::new().order_by("code"))? {
                match &course.instructor {
                    Some(instructor) => println!("{} {} ({instructor})", course.code, course.name),
                    None => println!("{} {}", course.code, course.name),
                }
            }
        }
    }
    Ok(())
}

fn run_assignment(cmd: AssignmentCommand, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AssignmentCommand::Add {
            course,
            title,
            description,
            due,
            points,
        } => {
            let Some(course) = find_course(ctx, &course)? else {
                anyhow::bail!("unknown course: {course}");
            };
            let assignment = Assignment {
                id: new_id(),
                course_id: course.id,
                title,
                description,
                due_date: due,
                total_points: points,
                created_at: ctx.now,
            };
            ctx.store.insert(&assignment)?;
            tracing::info!(id = %assignment.id, "saved assignment");
            println!("{}", assignment.id);
        }
        AssignmentCommand::List => {
            let query = Query::new()
                .gte("due_date", serde_json::to_value(ctx.now)?)
                .order_by("due_date");
            let mut courses = CourseCache::default();
            for assignment in ctx.store.fetch::<Assignment>(&query)? {
                let code = courses.code(ctx, &assignment.course_id)?;
                let plan = planner::plan(assignment.total_points, assignment.due_date, ctx.now);
                let urgency = DueUrgency::from_days(plan.days_until_due);
                println!(
                    "{code} {} due {} ({} days left, {})",
                    assignment.title,
                    assignment.due_date.format("%Y-%m-%d %H:%M"),
                    plan.days_until_due,
                    urgency.as_str(),
                );
                let start = if plan.start_offset_days > 0 {
                    format!("start in {} days", plan.start_offset_days)
                } else {
                    "start now".to_string()
                };
                println!(
                    "    {} points, about {}h of study, {start}",
                    assignment.total_points, plan.hours_needed
                );
            }
        }
    }
    Ok(())
}

fn run_grade(cmd: GradeCommand, ctx: &Context) -> anyhow::Result<()> {
    let GradeCommand::Add {
        assignment,
        student,
        score,
        feedback,
        graded_at,
    } = cmd;
    if let Some(score) = score
        && (!score.is_finite() || score < 0.0)
    {
        anyhow::bail!("score must be a non-negative number, got {score}");
    }
    if ctx.store.get::<Assignment>(&assignment)?.is_none() {
        anyhow::bail!("unknown assignment: {assignment}");
    }
    let student_id = match student {
        Some(student) => student,
        None => ctx.require_user()?,
    };
    let grade = Grade {
        id: new_id(),
        assignment_id: assignment,
        student_id,
        score,
        feedback,
        graded_at: graded_at.unwrap_or(ctx.now),
    };
    ctx.store.insert(&grade)?;
    tracing::info!(id = %grade.id, student = %grade.student_id, "saved grade");
    println!("{}", grade.id);
    Ok(())
}

fn show_grades(ctx: &Context) -> anyhow::Result<()> {
    let user = ctx.require_user()?;
    let query = Query::new()
        .eq("student_id", user.as_str())
        .not_null("score")
        .order_by_desc("graded_at");
    let mut assignments: HashMap<String, Option<Assignment>> = HashMap::new();
    let mut rows = Vec::new();
    for grade in ctx.store.fetch::<Grade>(&query)? {
        if !assignments.contains_key(&grade.assignment_id) {
            let found = ctx.store.get::<Assignment>(&grade.assignment_id)?;
            assignments.insert(grade.assignment_id.clone(), found);
        }
        let Some(Some(assignment)) = assignments.get(&grade.assignment_id) else {
            tracing::warn!(grade = %grade.id, "grade refers to a missing assignment");
            continue;
        };
        if let Some(record) = grade.against(assignment) {
            rows.push((assignment.title.clone(), grade.feedback.clone(), record));
        }
    }

    let records: Vec<_> = rows.iter().map(|(_, _, record)| record).collect();
    let report = grades::report(&records);
    println!("GPA: {:.2}", report.gpa);
    println!("Trend: {}", report.trend.as_str());
    println!("{}", report.advice);
    for (title, feedback, record) in &rows {
        let pct = grades::percentage(record.score, record.max_score);
        println!(
            "{title}: {}/{} ({pct}%, {})",
            record.score,
            record.max_score,
            GradeBand::from_percentage(pct).as_str()
        );
        if let Some(feedback) = feedback {
            println!("    {feedback}");
        }
    }
    Ok(())
}

fn run_timetable(cmd: TimetableCommand, ctx: &Context) -> anyhow::Result<()> {
    let user = ctx.require_user()?;
    match cmd {
        TimetableCommand::Add {
            course,
            day,
            start,
            end,
            room,
        } => {
            if end <= start {
                anyhow::bail!("class must end after it starts");
            }
            let Some(course) = find_course(ctx, &course)? else {
                anyhow::bail!("unknown course: {course}");
            };
            let entry = TimetableEntry {
                id: new_id(),
                user_id: user,
                course_id: course.id,
                day_of_week: day,
                start_time: start,
                end_time: end,
                room,
                created_at: ctx.now,
            };
            ctx.store.insert(&entry)?;
            tracing::info!(id = %entry.id, day = entry.day_of_week, "saved timetable entry");
            println!("{}", entry.id);
        }
        TimetableCommand::Show { day } => {
            let day = day.unwrap_or_else(|| ctx.today().weekday().number_from_monday() as u8);
            let query = Query::new()
                .eq("user_id", user.as_str())
                .eq("day_of_week", day)
                .order_by("start_time");
            let entries = ctx.store.fetch::<TimetableEntry>(&query)?;
            if entries.is_empty() {
                println!("No classes");
            }
            let mut courses = CourseCache::default();
            for entry in entries {
                let code = courses.code(ctx, &entry.course_id)?;
                println!(
                    "{}-{} {code} {}",
                    entry.start_time.format("%H:%M"),
                    entry.end_time.format("%H:%M"),
                    entry.room.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}

fn find_course(ctx: &Context, code: &str) -> anyhow::Result<Option<Course>> {
    let mut found = ctx
        .store
        .fetch::<Course>(&Query::new().eq("code", code).limit(1))?;
    Ok(found.pop())
}

/// Course codes by id, looked up once per command.
#[derive(Default)]
struct CourseCache(HashMap<String, String>);

impl CourseCache {
    fn code(&mut self, ctx: &Context, course_id: &str) -> anyhow::Result<String> {
        if let Some(code) = self.0.get(course_id) {
            return Ok(code.clone());
        }
        let code = ctx
            .store
            .get::<Course>(course_id)?
            .map(|c| c.code)
            .unwrap_or_else(|| "?".to_string());
        self.0.insert(course_id.to_string(), code.clone());
        Ok(code)
    }
}
