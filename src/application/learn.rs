#[cfg(test)]
#[path = "learn_test.rs"]
mod tests;

use std::fs;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;

use crate::application::repl;
use crate::domain::services::Session;

pub const SYSTEM_INSTRUCTION: &str = "You are an AI-powered personalized learning path generator. Your job is to create tailored learning paths for users based on their goals, current skills, and preferences. Provide step-by-step, actionable plans with recommended resources, timelines, and checkpoints. Be friendly, supportive, and always encourage the user. If the user provides a resume or skill list, analyze it and use it to personalize the learning path.";

const UNSUPPORTED_RESUME: &str = "[Resume file type not supported; only plain-text files are read.]";
const UNREADABLE_RESUME: &str = "[Error reading resume file.]";

pub struct PlanRequest {
    pub goal: String,
    pub skills: String,
    pub preferences: String,
    pub resume: String,
}

impl PlanRequest {
    pub fn from_matches(matches: &ArgMatches) -> PlanRequest {
        let resume = match matches.get_one::<String>("resume") {
            Some(path) => read_resume(path),
            None => "".to_string(),
        };

        return PlanRequest {
            goal: matches.get_one::<String>("goal").cloned().unwrap_or_default(),
            skills: matches
                .get_one::<String>("skills")
                .cloned()
                .unwrap_or_default(),
            preferences: matches
                .get_one::<String>("preferences")
                .cloned()
                .unwrap_or_default(),
            resume,
        };
    }

    fn compose(&self) -> String {
        return format!(
            "User goal: {goal}\nUser skills: {skills}\nUser preferences: {preferences}\nResume or skill list: {resume}\nGenerate a clear, concise, and actionable learning path for the user. Break the path into steps, recommend open-source resources, and provide checkpoints. Format the output as a numbered list with explanations and links. Always encourage the user and suggest how to track progress.",
            goal = self.goal,
            skills = self.skills,
            preferences = self.preferences,
            resume = self.resume,
        );
    }
}

fn read_resume(path: &str) -> String {
    if !path.ends_with(".txt") {
        return UNSUPPORTED_RESUME.to_string();
    }

    match fs::read_to_string(path) {
        Ok(text) => return text,
        Err(err) => {
            tracing::warn!(error = ?err, path = path, "failed to read resume file");
            return UNREADABLE_RESUME.to_string();
        }
    }
}

/// Generates the plan through the session, then retains it as the working
/// context so every follow-up question carries it. The plan generation
/// exchange itself never shows up as turns in the follow-up transcript.
async fn generate(session: &mut Session, request: &PlanRequest) -> Result<String> {
    let plan = session.submit(&request.compose()).await?;
    session.set_working_context(&plan);
    session.reset();

    return Ok(plan);
}

pub async fn start(mut session: Session, request: PlanRequest) -> Result<()> {
    if request.goal.trim().is_empty() {
        bail!("a learning goal is required to get started");
    }

    println!("Generating your personalized learning path...");
    let plan = generate(&mut session, &request).await?;

    println!("\n{plan}\n");
    println!("Ask follow-up questions about your plan below, or /quit to exit.");

    return repl::start(session).await;
}
