/// A canned search preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub slug: &'static str,
    pub label: &'static str,
    pub query: &'static str,
}

pub const TOPICS: &[Topic] = &[
    Topic {
        slug: "ai-ml",
        label: "AI & Machine Learning",
        query: "Artificial Intelligence OR Machine Learning OR AI",
    },
    Topic {
        slug: "deep-learning",
        label: "Deep Learning",
        query: "deep learning OR neural network OR transformer",
    },
    Topic {
        slug: "llm",
        label: "Large Language Models",
        query: "LLM OR GPT OR language model OR ChatGPT",
    },
    Topic {
        slug: "ai-research",
        label: "AI Research",
        query: "AI research OR AI breakthrough OR artificial intelligence research",
    },
    Topic {
        slug: "ai-business",
        label: "AI in Business",
        query: "AI business OR enterprise AI OR business intelligence",
    },
    Topic {
        slug: "generative-ai",
        label: "Generative AI",
        query: "generative AI OR diffusion model OR text generation",
    },
    Topic {
        slug: "ai-healthcare",
        label: "AI in Healthcare",
        query: "AI healthcare OR medical AI OR diagnostic AI",
    },
    Topic {
        slug: "autonomous",
        label: "AI in Autonomous Systems",
        query: "autonomous vehicle OR self-driving OR robotics",
    },
    Topic {
        slug: "data-science",
        label: "Data Science & AI",
        query: "data science OR machine learning analytics",
    },
    Topic {
        slug: "ai-creativity",
        label: "AI & Creativity",
        query: "AI art OR generative art OR AI music",
    },
];

/// Look a topic up by slug or label, ignoring case and surrounding whitespace
pub fn find_topic(name: &str) -> Option<&'static Topic> {
    let name = name.trim();
    TOPICS
        .iter()
        .find(|topic| topic.slug.eq_ignore_ascii_case(name) || topic.label.eq_ignore_ascii_case(name))
}
