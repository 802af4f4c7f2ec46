//! Built-in skill vocabulary, used when no `SKILLS_PATH` is configured.

pub const DEFAULT_SKILLS: &[&str] = &[
    // Languages
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "rust",
    "sql",
    "scala",
    "kotlin",
    "swift",
    "php",
    "ruby",
    // Data & ML
    "machine learning",
    "deep learning",
    "data analysis",
    "data visualization",
    "statistics",
    "natural language processing",
    "computer vision",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "spark",
    "tableau",
    "power bi",
    "excel",
    // Web & backend
    "react",
    "angular",
    "node.js",
    "django",
    "flask",
    "spring",
    "html",
    "css",
    "rest api",
    "graphql",
    // Infra & data stores
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "linux",
    "git",
    "ci/cd",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    // Practice
    "agile",
    "project management",
    "communication",
    "leadership",
];

/// Alias → canonical skill. An empty target means the alias is recognized
/// but contributes no skill.
///
/// Aliases are also searched as substrings, so very short ones ("py", "ml")
/// are left out: they would hit inside ordinary words.
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("python3", "python"),
    ("js", "javascript"),
    ("ecmascript", "javascript"),
    ("cpp", "c++"),
    ("csharp", "c#"),
    ("sklearn", "machine learning"),
    ("scikit-learn", "machine learning"),
    ("neural networks", "deep learning"),
    ("nlp", "natural language processing"),
    ("cv", ""),
    ("opencv", "computer vision"),
    ("keras", "tensorflow"),
    ("torch", "pytorch"),
    ("pyspark", "spark"),
    ("powerbi", "power bi"),
    ("ms excel", "excel"),
    ("ms office", ""),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("nodejs", "node.js"),
    ("spring boot", "spring"),
    ("restful", "rest api"),
    ("amazon web services", "aws"),
    ("google cloud", "gcp"),
    ("k8s", "kubernetes"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("github", "git"),
    ("gitlab", "git"),
    ("continuous integration", "ci/cd"),
    ("scrum", "agile"),
    ("team lead", "leadership"),
    ("microsoft office", ""),
];
