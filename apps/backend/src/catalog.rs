//! The built course served to every device.
//!
//! Built once at startup and shared read-only.

use std::path::Path;

use anyhow::Context;
use leshono_core::{
    build_course, flatten, ContentRules, Course, CourseDocument, FlatCourse, Lesson, LessonMap,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Course, lessons and play order for one document version
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    version: String,
    course: Course,
    lessons: LessonMap,
    flat: FlatCourse,
}

impl CourseCatalog {
    /// Build from document text.
    ///
    /// With a seed the generated exercises are reproducible across restarts.
    pub fn from_json(
        content: &str,
        rules: &ContentRules,
        seed: Option<u64>,
    ) -> leshono_core::Result<Self> {
        let document = CourseDocument::from_json(content)?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let built = build_course(&document, rules, &mut rng)?;
        let flat = flatten(&built.course, &built.lessons);

        Ok(Self {
            version: fingerprint(content),
            course: built.course,
            lessons: built.lessons,
            flat,
        })
    }

    /// Read the document and optional rule overrides from disk and build.
    pub fn load(
        course_path: &Path,
        rules_path: Option<&Path>,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let rules = match rules_path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading content rules {}", path.display()))?;
                ContentRules::from_json(&content)?
            }
            None => ContentRules::default(),
        };

        let content = std::fs::read_to_string(course_path)
            .with_context(|| format!("reading course document {}", course_path.display()))?;
        let catalog = Self::from_json(&content, &rules, seed)?;

        tracing::info!(
            version = %catalog.version,
            units = catalog.course.unit_count(),
            lessons = catalog.flat.len(),
            "loaded course"
        );

        Ok(catalog)
    }

    /// SHA-256 of the document text
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn flat(&self) -> &FlatCourse {
        &self.flat
    }

    /// A lesson by id.
    ///
    /// Covers lessons outside the path (pages a unit dropped) and placeholders
    /// for ids a unit declares without content.
    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons
            .get(lesson_id)
            .or_else(|| self.flat.entry(lesson_id).map(|entry| &entry.lesson))
    }
}

/// Hex SHA-256 of the content
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
