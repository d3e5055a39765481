use super::profile::CandidateContact;

const DISPLAYED_SKILLS: usize = 4;
const DEFAULT_TOOLKIT: &str = "SQL, Excel, Tableau, and Python";

/// Keyword-selected project paragraphs. The first entry whose keywords hit the title wins.
const PROJECT_PARAGRAPHS: &[(&[&str], &str)] = &[
    (
        &["finance", "bank", "loan", "risk"],
        "In a recent loan default analysis I worked through more than 100,000 loan records \
         with SQL and R to isolate the borrower patterns behind defaults, turning the findings \
         into recommendations the credit team could act on.",
    ),
    (
        &["retail", "ecommerce", "sales"],
        "My retail sales analysis processed several hundred thousand transactions to explain \
         revenue swings, and the Tableau dashboards I built surfaced seasonal trends and \
         customer buying behavior for non-technical stakeholders.",
    ),
    (
        &["telecom", "churn", "customer"],
        "In a customer churn study I delivered end-to-end analytics on thousands of \
         subscribers, identifying high-risk segments through statistical testing and \
         presenting retention strategies in interactive dashboards.",
    ),
];

const GENERAL_PARAGRAPH: &str = "In a pricing analytics project I combined regression \
     modeling with ANOVA testing across thousands of records and communicated the pricing \
     drivers to stakeholders through Tableau visualizations.";

/// Renders plain-text cover letters from the matched skills of an evaluation.
#[derive(Debug, Clone, Default)]
pub struct CoverLetterGenerator {
    contact: CandidateContact,
}

impl CoverLetterGenerator {
    pub fn new(contact: CandidateContact) -> Self {
        Self { contact }
    }

    pub fn generate(&self, job_title: &str, company: &str, matched_skills: &[String]) -> String {
        let skills_text = if matched_skills.is_empty() {
            DEFAULT_TOOLKIT.to_string()
        } else {
            matched_skills
                .iter()
                .take(DISPLAYED_SKILLS)
                .map(|skill| title_case(skill))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let company = if company.trim().is_empty() {
            "your company"
        } else {
            company
        };

        let mut letter = format!(
            "Dear Hiring Manager,\n\n\
             I am writing to express my interest in the {job_title} position at {company}. \
             With hands-on experience in {skills_text}, I am confident I can contribute to \
             your data and analytics initiatives from day one.\n\n\
             {project}\n\n\
             I am excited about the opportunity at {company} and would welcome the chance to \
             bring an analytical mindset to your team.\n\n\
             Thank you for considering my application.\n\n\
             Best regards,",
            project = select_project_paragraph(job_title),
        );

        let signature = [
            self.contact.name.clone(),
            self.contact.phone.as_ref().map(|phone| format!("Phone: {phone}")),
            self.contact.email.as_ref().map(|email| format!("Email: {email}")),
            self.contact
                .linkedin
                .as_ref()
                .map(|linkedin| format!("LinkedIn: {linkedin}")),
        ];
        for line in signature.into_iter().flatten() {
            letter.push('\n');
            letter.push_str(&line);
        }

        letter
    }
}

fn select_project_paragraph(job_title: &str) -> &'static str {
    let title = job_title.to_lowercase();
    PROJECT_PARAGRAPHS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, paragraph)| *paragraph)
        .unwrap_or(GENERAL_PARAGRAPH)
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(ch);
            at_word_start = true;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn title_case_matches_display_convention() {
        assert_eq!(title_case("power bi"), "Power Bi");
        assert_eq!(title_case("core_data"), "Core_Data");
        assert_eq!(title_case("sql"), "Sql");
    }

    #[test]
    fn letter_lists_first_four_skills() {
        let generator = CoverLetterGenerator::default();
        let letter = generator.generate(
            "Junior Data Analyst",
            "TechCorp Solutions",
            &skills(&["sql", "excel", "tableau", "python", "r"]),
        );
        assert!(letter.contains("Junior Data Analyst position at TechCorp Solutions"));
        assert!(letter.contains("Sql, Excel, Tableau, Python"));
        assert!(!letter.contains("Python, R"));
    }

    #[test]
    fn letter_falls_back_to_default_toolkit() {
        let letter = CoverLetterGenerator::default().generate("Analyst", "Acme", &[]);
        assert!(letter.contains(DEFAULT_TOOLKIT));
    }

    #[test]
    fn project_paragraph_follows_title_keywords() {
        assert!(select_project_paragraph("Credit Risk Analyst").contains("loan default"));
        assert!(select_project_paragraph("Retail Analytics Lead").contains("retail sales"));
        assert!(select_project_paragraph("Customer Churn Analyst").contains("churn"));
        assert_eq!(select_project_paragraph("MIS Executive"), GENERAL_PARAGRAPH);
    }

    #[test]
    fn signature_skips_missing_contact_lines() {
        let generator = CoverLetterGenerator::new(CandidateContact {
            name: Some("Avery Quinn".to_string()),
            email: Some("avery@example.com".to_string()),
            phone: None,
            linkedin: None,
        });
        let letter = generator.generate("Data Analyst", "Acme", &skills(&["sql"]));
        assert!(letter.ends_with("Best regards,\nAvery Quinn\nEmail: avery@example.com"));
        assert!(!letter.contains("Phone:"));
    }
}
