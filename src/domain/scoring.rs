//! Relevance scoring for the recommended-projects feed.
//!
//! Matching is case-insensitive substring containment, in both directions
//! where noted ("React" matches "react native" and vice versa).

/// Student attributes the scorer reads. Built from the profile row plus its
/// skill child rows.
#[derive(Debug, Default)]
pub struct StudentInterests {
    pub skills: Vec<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub branch: Option<String>,
}

/// Project attributes the scorer reads. `required_skills` is the union of the
/// project-level list and every position's list.
#[derive(Debug, Default)]
pub struct ProjectFacts {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub required_skills: Vec<String>,
}

const SKILL_MATCH_WEIGHT: i64 = 10;
const TAG_MATCH_WEIGHT: i64 = 5;
const DEPARTMENT_WEIGHT: i64 = 3;
const SPECIALIZATION_WEIGHT: i64 = 2;
const BRANCH_WEIGHT: i64 = 3;
const SKILL_IN_TITLE_WEIGHT: i64 = 4;
const SKILL_IN_DESCRIPTION_WEIGHT: i64 = 2;

pub fn relevance_score(student: &StudentInterests, project: &ProjectFacts) -> i64 {
    let skills: Vec<String> = student
        .skills
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let title = project.title.to_lowercase();
    let description = project.description.to_lowercase();
    let category = project.category.to_lowercase();

    let mut score = 0;

    for required in &project.required_skills {
        let required = required.to_lowercase();
        if !required.is_empty() && skills.iter().any(|s| mutual_contains(s, &required)) {
            score += SKILL_MATCH_WEIGHT;
        }
    }

    for tag in &project.tags {
        let tag = tag.to_lowercase();
        if !tag.is_empty() && skills.iter().any(|s| mutual_contains(s, &tag)) {
            score += TAG_MATCH_WEIGHT;
        }
    }

    let text_fields = [&title, &description, &category];
    score += keyword_hit(&student.department, &text_fields, DEPARTMENT_WEIGHT);
    score += keyword_hit(&student.specialization, &text_fields, SPECIALIZATION_WEIGHT);
    score += keyword_hit(&student.branch, &text_fields, BRANCH_WEIGHT);

    for skill in &skills {
        if title.contains(skill.as_str()) {
            score += SKILL_IN_TITLE_WEIGHT;
        }
        if description.contains(skill.as_str()) {
            score += SKILL_IN_DESCRIPTION_WEIGHT;
        }
    }

    score
}

fn mutual_contains(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn keyword_hit(keyword: &Option<String>, fields: &[&String], weight: i64) -> i64 {
    match keyword {
        Some(k) if !k.trim().is_empty() => {
            let k = k.to_lowercase();
            if fields.iter().any(|f| f.contains(&k)) {
                weight
            } else {
                0
            }
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_with_skills(skills: &[&str]) -> StudentInterests {
        StudentInterests {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn required_skill_match_scores_ten() {
        let student = student_with_skills(&["React"]);
        let project = ProjectFacts {
            required_skills: vec!["react".into()],
            ..Default::default()
        };
        assert_eq!(relevance_score(&student, &project), 10);
    }

    #[test]
    fn substring_matches_both_directions() {
        let student = student_with_skills(&["TypeScript"]);
        let project = ProjectFacts {
            required_skills: vec!["script".into()],
            ..Default::default()
        };
        assert_eq!(relevance_score(&student, &project), 10);
    }

    #[test]
    fn tag_match_scores_five() {
        let student = student_with_skills(&["machine learning"]);
        let project = ProjectFacts {
            tags: vec!["Machine Learning".into()],
            ..Default::default()
        };
        assert_eq!(relevance_score(&student, &project), 5);
    }

    #[test]
    fn department_hit_in_description_scores_three() {
        let student = StudentInterests {
            department: Some("Biotechnology".into()),
            ..Default::default()
        };
        let project = ProjectFacts {
            description: "A biotechnology platform for crop science".into(),
            ..Default::default()
        };
        assert_eq!(relevance_score(&student, &project), 3);
    }

    #[test]
    fn skill_in_title_and_description_stacks() {
        let student = student_with_skills(&["blockchain"]);
        let project = ProjectFacts {
            title: "Blockchain supply tracker".into(),
            description: "Tracks goods on a blockchain ledger".into(),
            ..Default::default()
        };
        // +4 title, +2 description
        assert_eq!(relevance_score(&student, &project), 6);
    }

    #[test]
    fn unrelated_project_scores_zero() {
        let student = student_with_skills(&["Figma"]);
        let project = ProjectFacts {
            title: "Solar farm logistics".into(),
            description: "Rural energy distribution".into(),
            category: "Clean Tech".into(),
            tags: vec!["IoT".into()],
            required_skills: vec!["embedded C".into()],
            ..Default::default()
        };
        assert_eq!(relevance_score(&student, &project), 0);
    }

    #[test]
    fn empty_skills_do_not_match_everything() {
        let student = student_with_skills(&[""]);
        let project = ProjectFacts {
            title: "Anything".into(),
            required_skills: vec!["anything".into()],
            ..Default::default()
        };
        assert_eq!(relevance_score(&student, &project), 0);
    }
}
