//! Template filling for the tailored application package

use crate::config::TailorConfig;
use crate::error::{CvTailorError, Result};
use crate::processing::keywords::KeywordClassifier;
use log::debug;

/// Technologies named in the summary, detected in the job description
const TECHNOLOGIES: &[(&str, &str)] = &[
    ("python", "Python"),
    ("sql", "SQL"),
    ("r ", "R"),
    ("java ", "Java"),
    ("machine learning", "Machine Learning"),
    ("deep learning", "Deep Learning"),
    ("nlp", "NLP"),
    ("computer vision", "Computer Vision"),
    ("power bi", "Power BI"),
    ("tableau", "Tableau"),
    ("looker", "Looker"),
    ("aws", "AWS"),
    ("azure", "Azure"),
    ("gcp", "GCP"),
    ("spark", "Apache Spark"),
    ("hadoop", "Hadoop"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceTier {
    Senior,
    Junior,
    Established,
}

impl ExperienceTier {
    fn descriptors(&self) -> [&'static str; 3] {
        match self {
            ExperienceTier::Senior => ["senior-level", "leadership", "strategic"],
            ExperienceTier::Junior => ["emerging", "enthusiastic", "foundational"],
            ExperienceTier::Established => ["experienced", "proven", "skilled"],
        }
    }
}

/// Senior wording wins over junior wording when a CV has both
const EXPERIENCE_TIERS: &[(&str, ExperienceTier)] = &[
    ("senior", ExperienceTier::Senior),
    ("lead", ExperienceTier::Senior),
    ("manager", ExperienceTier::Senior),
    ("head of", ExperienceTier::Senior),
    ("junior", ExperienceTier::Junior),
    ("entry", ExperienceTier::Junior),
    ("graduate", ExperienceTier::Junior),
    ("intern", ExperienceTier::Junior),
];

/// Skills the CV already evidences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvSkill {
    Python,
    Sql,
    MachineLearning,
}

const CV_SKILLS: &[(&str, CvSkill)] = &[
    ("python", CvSkill::Python),
    ("pandas", CvSkill::Python),
    ("numpy", CvSkill::Python),
    ("sql", CvSkill::Sql),
    ("database", CvSkill::Sql),
    ("query", CvSkill::Sql),
    ("machine learning", CvSkill::MachineLearning),
    ("scikit", CvSkill::MachineLearning),
    ("tensorflow", CvSkill::MachineLearning),
    ("pytorch", CvSkill::MachineLearning),
];

/// Skill areas the job description asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillDemand {
    Python,
    Sql,
    MachineLearning,
    DeepLearning,
    Nlp,
    Visualization,
    Cloud,
    BigData,
}

const SKILL_DEMANDS: &[(&str, SkillDemand)] = &[
    ("python", SkillDemand::Python),
    ("programming", SkillDemand::Python),
    ("sql", SkillDemand::Sql),
    ("database", SkillDemand::Sql),
    ("machine learning", SkillDemand::MachineLearning),
    ("ml", SkillDemand::MachineLearning),
    ("predictive", SkillDemand::MachineLearning),
    ("deep learning", SkillDemand::DeepLearning),
    ("neural", SkillDemand::DeepLearning),
    ("tensorflow", SkillDemand::DeepLearning),
    ("pytorch", SkillDemand::DeepLearning),
    ("nlp", SkillDemand::Nlp),
    ("natural language", SkillDemand::Nlp),
    ("power bi", SkillDemand::Visualization),
    ("tableau", SkillDemand::Visualization),
    ("dashboard", SkillDemand::Visualization),
    ("visualization", SkillDemand::Visualization),
    ("aws", SkillDemand::Cloud),
    ("azure", SkillDemand::Cloud),
    ("gcp", SkillDemand::Cloud),
    ("cloud", SkillDemand::Cloud),
    ("spark", SkillDemand::BigData),
    ("big data", SkillDemand::BigData),
    ("hadoop", SkillDemand::BigData),
];

/// Any letter r counts as a mention of R
const R_LANGUAGE: &[(&str, ())] = &[("r", ())];

const PYTHON_SKILL: &str = "Python (Pandas, NumPy, Scikit-learn, Matplotlib, Seaborn)";
const SQL_SKILL: &str = "SQL (Complex queries, database optimization, ETL processes)";
const R_SKILL: &str = "R (tidyverse, ggplot2, statistical analysis, data visualization)";
const ML_SKILL: &str = "Machine Learning (Regression, Classification, Clustering, Model Evaluation)";
const DEEP_LEARNING_SKILL: &str = "Deep Learning (Neural Networks, TensorFlow, PyTorch, Keras)";
const NLP_SKILL: &str = "Natural Language Processing (Sentiment Analysis, Text Classification, NLTK)";
const VISUALIZATION_SKILL: &str = "Data Visualization (Power BI, Tableau, Matplotlib, Plotly)";
const CLOUD_SKILL: &str = "Cloud Platforms (AWS/Azure, Databricks, Cloud ML Services)";
const BIG_DATA_SKILL: &str = "Big Data Technologies (Apache Spark, Hadoop, Distributed Computing)";

/// Always closes the skills section
pub const ESSENTIAL_SKILLS: [&str; 5] = [
    "Statistical Analysis & Hypothesis Testing",
    "Data Wrangling & Feature Engineering",
    "Model Deployment & MLOps Practices",
    "Cross-functional Collaboration & Stakeholder Management",
    "Data Storytelling & Technical Communication",
];

const COVER_LETTER_SKILLS: &[(&str, &str)] = &[
    ("python", "Python programming"),
    ("sql", "SQL and database management"),
    ("machine learning", "machine learning model development"),
    ("power bi", "data visualization"),
    ("tableau", "data visualization"),
    ("aws", "cloud platform experience"),
    ("azure", "cloud platform experience"),
];

const LINKEDIN_FOCUS: &[(&str, &str)] = &[
    ("machine learning", "machine learning initiatives"),
    ("ml", "machine learning initiatives"),
    ("data analysis", "data analytics projects"),
    ("analytics", "data analytics projects"),
    ("data engineering", "data engineering work"),
    ("etl", "data engineering work"),
];

const DEFAULT_LINKEDIN_FOCUS: &str = "data science work";

/// The form fields of one tailoring run
#[derive(Debug, Clone)]
pub struct TailoringRequest {
    pub cv_text: String,
    pub job_title: String,
    pub company: String,
    pub job_description: String,
}

impl TailoringRequest {
    /// Title, company and job description are required; the CV text may be
    /// empty when the upload held no extractable text
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("job title", &self.job_title),
            ("company name", &self.company),
            ("job description", &self.job_description),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(CvTailorError::InvalidInput(format!("The {} must not be empty", field)));
            }
        }
        Ok(())
    }
}

/// Fills the summary, skills, cover letter and LinkedIn templates
pub struct Tailor {
    settings: TailorConfig,
    technologies: KeywordClassifier<&'static str>,
    experience: KeywordClassifier<ExperienceTier>,
    cv_skills: KeywordClassifier<CvSkill>,
    skill_demands: KeywordClassifier<SkillDemand>,
    cover_letter_skills: KeywordClassifier<&'static str>,
    linkedin_focus: KeywordClassifier<&'static str>,
    r_language: KeywordClassifier<()>,
}

impl Tailor {
    pub fn new() -> Result<Self> {
        Self::with_settings(TailorConfig::default())
    }

    pub fn with_settings(settings: TailorConfig) -> Result<Self> {
        Ok(Self {
            settings,
            technologies: KeywordClassifier::new(TECHNOLOGIES)?,
            experience: KeywordClassifier::new(EXPERIENCE_TIERS)?,
            cv_skills: KeywordClassifier::new(CV_SKILLS)?,
            skill_demands: KeywordClassifier::new(SKILL_DEMANDS)?,
            cover_letter_skills: KeywordClassifier::new(COVER_LETTER_SKILLS)?,
            linkedin_focus: KeywordClassifier::new(LINKEDIN_FOCUS)?,
            r_language: KeywordClassifier::new(R_LANGUAGE)?,
        })
    }

    pub fn experience_tier(&self, cv_text: &str) -> ExperienceTier {
        self.experience
            .first_match(cv_text)
            .unwrap_or(ExperienceTier::Established)
    }

    /// Professional summary naming the job's technologies at the CV's seniority
    pub fn generate_tailored_summary(&self, job_description: &str, cv_text: &str) -> String {
        let technologies = self.technologies.classify(job_description);
        let tier = self.experience_tier(cv_text);
        debug!("Summary: tier {:?}, technologies {:?}", tier, technologies);

        let tech_text = if technologies.is_empty() {
            self.settings.fallback_focus.clone()
        } else {
            technologies
                .iter()
                .take(self.settings.max_summary_technologies)
                .copied()
                .collect::<Vec<_>>()
                .join(", ")
        };
        let exp_text = title_case(&tier.descriptors()[..2].join(" "));

        format!(
            "{exp_text} Data Scientist with comprehensive expertise in {tech_text}. Proven ability to transform complex data into actionable insights that drive measurable business outcomes. Skilled in developing and deploying predictive models, creating interactive dashboards, and effectively communicating technical findings to diverse stakeholders. Strong background in data preprocessing, feature engineering, and statistical analysis with a demonstrated track record of delivering innovative solutions in fast-paced environments."
        )
    }

    /// Bullet list of skills; programming and ML lines require evidence in the CV
    pub fn generate_tailored_skills(&self, job_description: &str, cv_text: &str) -> String {
        let cv = self.cv_skills.classify(cv_text);
        let demands = self.skill_demands.classify(job_description);
        let wants = |demand: SkillDemand| demands.contains(&demand);
        let has = |skill: CvSkill| cv.contains(&skill);

        let mut skills: Vec<&str> = Vec::new();

        if has(CvSkill::Python) && wants(SkillDemand::Python) {
            skills.push(PYTHON_SKILL);
        }
        if has(CvSkill::Sql) && wants(SkillDemand::Sql) {
            skills.push(SQL_SKILL);
        }
        if self.r_language.matches_any(cv_text) && self.r_language.matches_any(job_description) {
            skills.push(R_SKILL);
        }

        if has(CvSkill::MachineLearning) {
            if wants(SkillDemand::MachineLearning) {
                skills.push(ML_SKILL);
            }
            if wants(SkillDemand::DeepLearning) {
                skills.push(DEEP_LEARNING_SKILL);
            }
            if wants(SkillDemand::Nlp) {
                skills.push(NLP_SKILL);
            }
        }

        if wants(SkillDemand::Visualization) {
            skills.push(VISUALIZATION_SKILL);
        }
        if wants(SkillDemand::Cloud) {
            skills.push(CLOUD_SKILL);
        }
        if wants(SkillDemand::BigData) {
            skills.push(BIG_DATA_SKILL);
        }

        skills.extend(ESSENTIAL_SKILLS);
        debug!("Skills: cv {:?}, demands {:?}, {} lines", cv, demands, skills.len());

        skills
            .iter()
            .take(self.settings.max_skills)
            .map(|skill| format!("• {}", skill))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn generate_cover_letter(
        &self,
        job_description: &str,
        _cv_text: &str,
        company: &str,
        job_title: &str,
    ) -> String {
        let skills = self.cover_letter_skills.classify(job_description);
        let skills_text = if skills.is_empty() {
            self.settings.fallback_focus.clone()
        } else {
            skills.join(", ")
        };
        let company_upper = company.to_uppercase();
        let excerpt = excerpt(job_description, self.settings.excerpt_chars);

        let letter = format!(
            "
{company_upper}
Hiring Manager
Data Science Department

Dear Hiring Manager,

I am writing to express my enthusiastic interest in the {job_title} position at {company}. With my comprehensive background in data science and my expertise in {skills_text}, I am confident in my ability to make significant contributions to your team.

{excerpt}...

My qualifications align perfectly with your requirements:

• Technical Expertise: Advanced proficiency in the technical stack required for this role, with hands-on experience in developing and deploying data-driven solutions
• Business Impact: Proven ability to translate complex data into actionable insights that drive strategic decision-making and measurable business outcomes
• Collaboration: Strong communication skills with experience working in cross-functional teams to deliver projects that meet both technical and business requirements

I am particularly excited about the opportunity to contribute to {company}'s data initiatives and am impressed by your organization's commitment to innovation and excellence.

Thank you for considering my application. I have attached my CV for your review and would welcome the opportunity to discuss how my skills and experience can benefit your team.

Sincerely,

[Your Name]
[Your Phone Number]
[Your Email]
[Your LinkedIn Profile]
"
        );

        letter.trim().to_string()
    }

    pub fn generate_linkedin_message(&self, job_title: &str, company: &str, job_description: &str) -> String {
        let key_aspect = self
            .linkedin_focus
            .first_match(job_description)
            .unwrap_or(DEFAULT_LINKEDIN_FOCUS);

        let message = format!(
            "
Hi [Hiring Manager Name],

I hope this message finds you well. I came across the {job_title} position at {company} and was particularly impressed by your team's focus on {key_aspect}.

With my background in data science and experience in [mention your most relevant skill from the job description], I believe I could bring valuable expertise to your team. I've been following {company}'s work in the industry and am excited about the opportunity to contribute to your data-driven initiatives.

Would you be open to a brief 15-minute chat next week to discuss how my experience aligns with your team's needs?

Looking forward to connecting.

Best regards,

[Your Name]
Data Scientist
[Your Phone Number] | [Your Email]
[Your LinkedIn Profile URL]
"
        );

        message.trim().to_string()
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if prev_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_letter = c.is_alphabetic();
    }
    out
}

/// First `max_chars` characters of `text`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tailor() -> Tailor {
        Tailor::new().unwrap()
    }

    #[test]
    fn test_request_requires_every_field() {
        let request = TailoringRequest {
            cv_text: "cv".into(),
            job_title: "Analyst".into(),
            company: "  ".into(),
            job_description: "jd".into(),
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, CvTailorError::InvalidInput(msg) if msg.contains("company")));
    }

    #[test]
    fn test_title_case_handles_hyphens() {
        assert_eq!(title_case("senior-level leadership"), "Senior-Level Leadership");
        assert_eq!(title_case("experienced proven"), "Experienced Proven");
    }

    #[test]
    fn test_summary_names_first_four_technologies() {
        let jd = "We use Python, SQL, Tableau, AWS and Docker.";
        let summary = tailor().generate_tailored_summary(jd, "Senior analyst");

        assert!(summary.starts_with(
            "Senior-Level Leadership Data Scientist with comprehensive expertise in Python, SQL, Tableau, AWS."
        ));
        assert!(!summary.contains("Docker"));
    }

    #[test]
    fn test_summary_falls_back_without_technologies() {
        let summary = tailor().generate_tailored_summary("Great team, great snacks.", "Graduate student");
        assert!(summary.starts_with(
            "Emerging Enthusiastic Data Scientist with comprehensive expertise in data science and analytics."
        ));
    }

    #[test]
    fn test_experience_tier_priority() {
        let t = tailor();
        assert_eq!(t.experience_tier("Junior developer promoted to team lead"), ExperienceTier::Senior);
        assert_eq!(t.experience_tier("Summer intern"), ExperienceTier::Junior);
        assert_eq!(t.experience_tier("Data scientist"), ExperienceTier::Established);
    }

    #[test]
    fn test_skills_gated_by_cv() {
        let jd = "Must know Python and SQL.";
        let cv = "Experienced in Excel and presentations.";
        let skills = tailor().generate_tailored_skills(jd, cv);
        let lines: Vec<&str> = skills.lines().collect();

        assert!(!skills.contains("Python ("));
        assert!(!skills.contains("SQL ("));
        assert!(lines.len() <= 10);
        let expected_tail: Vec<String> = ESSENTIAL_SKILLS.iter().map(|s| format!("• {}", s)).collect();
        assert_eq!(lines, expected_tail);
    }

    #[test]
    fn test_skills_included_when_cv_and_jd_agree() {
        let jd = "Python programming, SQL database work, machine learning and NLP, Tableau dashboards on AWS with Spark.";
        let cv = "Built pandas pipelines, wrote SQL queries, trained scikit models.";
        let skills = tailor().generate_tailored_skills(jd, cv);
        let lines: Vec<&str> = skills.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], format!("• {}", PYTHON_SKILL));
        assert_eq!(lines[1], format!("• {}", SQL_SKILL));
        assert_eq!(lines[2], format!("• {}", R_SKILL));
        assert_eq!(lines[3], format!("• {}", ML_SKILL));
        assert_eq!(lines[4], format!("• {}", NLP_SKILL));
        assert_eq!(lines[5], format!("• {}", VISUALIZATION_SKILL));
        assert_eq!(lines[6], format!("• {}", CLOUD_SKILL));
        assert_eq!(lines[7], format!("• {}", BIG_DATA_SKILL));
        assert_eq!(lines[8], format!("• {}", ESSENTIAL_SKILLS[0]));
        assert_eq!(lines[9], format!("• {}", ESSENTIAL_SKILLS[1]));
    }

    #[test]
    fn test_r_needs_the_letter_in_both_texts() {
        let t = tailor();
        let with_r = t.generate_tailored_skills("programmer wanted", "Experienced analyst");
        assert!(with_r.contains(R_SKILL));

        let jd_without_r = t.generate_tailored_skills("Python and SQL", "Rigorous researcher");
        assert!(!jd_without_r.contains(R_SKILL));

        let cv_without_r = t.generate_tailored_skills("Great reporting role", "Data analyst");
        assert!(!cv_without_r.contains(R_SKILL));
    }

    #[test]
    fn test_empty_cv_is_accepted() {
        let request = TailoringRequest {
            cv_text: String::new(),
            job_title: "Analyst".into(),
            company: "Acme".into(),
            job_description: "Python and SQL required".into(),
        };
        assert!(request.validate().is_ok());

        let t = tailor();
        let summary = t.generate_tailored_summary(&request.job_description, &request.cv_text);
        assert!(summary.starts_with("Experienced Proven Data Scientist with comprehensive expertise in Python, SQL."));

        let skills = t.generate_tailored_skills(&request.job_description, &request.cv_text);
        let expected_tail: Vec<String> = ESSENTIAL_SKILLS.iter().map(|s| format!("• {}", s)).collect();
        assert_eq!(skills.lines().collect::<Vec<_>>(), expected_tail);
    }

    #[test]
    fn test_summary_r_and_java_need_trailing_space() {
        let t = tailor();
        let summary = t.generate_tailored_summary("R and Java developers", "");
        assert!(summary.contains("expertise in R, Java."));

        let summary = t.generate_tailored_summary("Javascript experts", "");
        assert!(summary.contains("expertise in data science and analytics."));
    }

    #[test]
    fn test_cover_letter_header_and_excerpt() {
        let jd = "a".repeat(200);
        let letter = tailor().generate_cover_letter(&jd, "", "Acme Corp", "Data Scientist");

        assert_eq!(letter.lines().next(), Some("ACME CORP"));
        assert!(letter.contains(&format!("\n{}...\n", "a".repeat(120))));
        assert!(!letter.contains(&"a".repeat(121)));
        assert!(letter.contains("the Data Scientist position at Acme Corp."));
        assert!(letter.contains("expertise in data science and analytics,"));
        assert!(letter.ends_with("[Your LinkedIn Profile]"));
    }

    #[test]
    fn test_cover_letter_skills_dedup() {
        let jd = "Python, Power BI and Tableau on Azure.";
        let letter = tailor().generate_cover_letter(jd, "", "Initech", "Analyst");
        assert!(letter.contains(
            "expertise in Python programming, data visualization, cloud platform experience, I am confident"
        ));
    }

    #[test]
    fn test_cover_letter_short_description_kept_whole() {
        let letter = tailor().generate_cover_letter("Short JD.", "", "nhs", "Analyst");
        assert_eq!(letter.lines().next(), Some("NHS"));
        assert!(letter.contains("\nShort JD....\n"));
    }

    #[test]
    fn test_linkedin_focus_priority() {
        let t = tailor();
        let msg = t.generate_linkedin_message("ML Engineer", "Acme", "ETL and machine learning");
        assert!(msg.contains("focus on machine learning initiatives."));

        let msg = t.generate_linkedin_message("Analyst", "Acme", "Build ETL pipelines");
        assert!(msg.contains("focus on data engineering work."));

        let msg = t.generate_linkedin_message("Developer", "Acme", "Build HTML email templates");
        assert!(msg.contains("focus on machine learning initiatives."));

        let msg = t.generate_linkedin_message("Analyst", "Acme", "Friendly office");
        assert!(msg.contains("focus on data science work."));
        assert!(msg.starts_with("Hi [Hiring Manager Name],"));
        assert!(msg.ends_with("[Your LinkedIn Profile URL]"));
    }
}
