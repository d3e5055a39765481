use crate::infra::{InMemoryApplicationLog, InMemoryNotifier};
use clap::Args;
use jobhunt_ai::error::AppError;
use jobhunt_ai::workflows::matching::{
    CandidateContact, CandidateProfile, JobPipeline, JobPosting, MatchConfigError, MatchEngine,
    PipelineOptions, PostingOutcome, ProfileSettings, SkillVocabulary,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the generated cover letter for every auto-applied posting.
    #[arg(long)]
    pub(crate) show_cover_letters: bool,
    /// Print the rendered notification feed after the run.
    #[arg(long)]
    pub(crate) show_alerts: bool,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(crate) fn demo_profile() -> Result<CandidateProfile, MatchConfigError> {
    CandidateProfile::from_settings(ProfileSettings {
        skills: strings(&[
            "sql",
            "excel",
            "tableau",
            "power bi",
            "python",
            "r",
            "data visualization",
            "statistics",
            "eda",
        ]),
        target_roles: strings(&["junior data analyst", "jr data analyst"]),
        exclusion_keywords: strings(&["customer service", "telecaller", "bpo", "call center"]),
        candidate: CandidateContact {
            name: Some("Demo Candidate".to_string()),
            email: Some("candidate@example.com".to_string()),
            phone: None,
            linkedin: None,
        },
        ..ProfileSettings::default()
    })
}

pub(crate) fn demo_engine() -> Result<MatchEngine, MatchConfigError> {
    Ok(MatchEngine::new(demo_profile()?, SkillVocabulary::standard()))
}

pub(crate) fn demo_postings() -> Vec<JobPosting> {
    vec![
        JobPosting {
            title: "Junior Data Analyst - SQL Excel Python Tableau".to_string(),
            description: Some(
                "SQL, Excel, Tableau, Power BI, Python, R, EDA, Statistics, Data Visualization"
                    .to_string(),
            ),
            company: Some("Amazing Analytics Corp".to_string()),
            location: Some("Bengaluru".to_string()),
            url: Some("https://jobs.example.com/demo/1".to_string()),
            salary: Some("6-8 LPA".to_string()),
            platform: Some("Demo".to_string()),
        },
        JobPosting {
            title: "MIS Analyst Reporting".to_string(),
            company: Some("DataDriven Inc".to_string()),
            location: Some("Remote".to_string()),
            url: Some("https://jobs.example.com/demo/2".to_string()),
            salary: Some("3-5 LPA".to_string()),
            platform: Some("Demo".to_string()),
            ..JobPosting::default()
        },
        JobPosting {
            title: "Customer Service Representative".to_string(),
            company: Some("Support Co".to_string()),
            location: Some("Mumbai".to_string()),
            url: Some("https://jobs.example.com/demo/3".to_string()),
            platform: Some("Demo".to_string()),
            ..JobPosting::default()
        },
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = demo_engine()?;
    let notifier = Arc::new(InMemoryNotifier::default());
    let pipeline = JobPipeline::new(
        Arc::new(engine),
        Arc::new(InMemoryApplicationLog::default()),
        notifier.clone(),
        PipelineOptions::default(),
    );

    println!("Job matching demo");
    let postings = demo_postings();
    let report = pipeline.run(&postings);

    for (posting, outcome) in postings.iter().zip(&report.outcomes) {
        let company = posting.company.as_deref().unwrap_or("N/A");
        println!("\n{} @ {}", posting.title, company);
        match outcome.evaluation() {
            Some(evaluation) => {
                println!("  Decision: {}", evaluation.summary());
                println!(
                    "  Title {} / Skills {}",
                    evaluation.title_score, evaluation.skill_score
                );
                if !evaluation.matched_skills.is_empty() {
                    println!("  Matched skills: {}", evaluation.skills_summary());
                }
            }
            None => println!("  Already in the application log"),
        }
        if let PostingOutcome::Applied { cover_letter, .. } = outcome {
            if args.show_cover_letters {
                println!("  Cover letter:\n{cover_letter}");
            }
        }
    }

    println!(
        "\nRun summary: scanned {} | applied {} | skipped {} | errors {}",
        report.stats.scanned, report.stats.applied, report.stats.skipped, report.stats.errors
    );

    if args.show_alerts {
        println!("\nNotifications");
        for alert in notifier.events() {
            println!("---\n{}", alert.render());
        }
    }

    Ok(())
}
