use crate::models::{Category, Job};

struct SeedJob {
    id: i64,
    title: &'static str,
    description: &'static str,
    price: &'static str,
    location: &'static str,
    time: &'static str,
    category: &'static str,
    skills: &'static [&'static str],
    match_score: i32,
    author: &'static str,
    date: &'static str,
    icon: &'static str,
}

const SAMPLE_JOBS: &[SeedJob] = &[
    SeedJob {
        id: 1,
        title: "Hjälp med IKEA-möbelmontering",
        description: "Behöver hjälp att montera en BILLY bokhylla och en MALM säng. Har alla delar och instruktioner.",
        price: "450 kr",
        location: "Stockholm, Södermalm",
        time: "2-3 timmar",
        category: "assembly",
        skills: &["Möbelmontering", "DIY"],
        match_score: 95,
        author: "Anna",
        date: "Idag",
        icon: "fas fa-tools",
    },
    SeedJob {
        id: 2,
        title: "Transport av soffa",
        description: "Behöver hjälp att transportera en 3-sits soffa från Kungens kurva till Sollentuna. Har bil med takräcke.",
        price: "700 kr",
        location: "Stockholm, Kungens kurva",
        time: "Halvdag",
        category: "moving",
        skills: &["Transport", "Lastning"],
        match_score: 82,
        author: "Marcus",
        date: "Idag",
        icon: "fas fa-truck-moving",
    },
    SeedJob {
        id: 3,
        title: "Hjälp med datorinstallation",
        description: "Behöver hjälp att installera Windows och sätta upp skrivare och wifi på min nya dator.",
        price: "350 kr",
        location: "Stockholm, Vasastan",
        time: "1-2 timmar",
        category: "tech",
        skills: &["Tekniksupport", "Installation"],
        match_score: 78,
        author: "Elin",
        date: "Igår",
        icon: "fas fa-laptop",
    },
    SeedJob {
        id: 4,
        title: "Städhjälp inför fest",
        description: "Behöver extra städhjälp i lägenheten (85 kvm) inför en fest på lördag.",
        price: "600 kr",
        location: "Stockholm, Östermalm",
        time: "3-4 timmar",
        category: "cleaning",
        skills: &["Städning", "Organisation"],
        match_score: 65,
        author: "David",
        date: "Igår",
        icon: "fas fa-broom",
    },
    SeedJob {
        id: 5,
        title: "Måla om ett rum",
        description: "Behöver hjälp att måla om ett sovrum på ca 15 kvm. All material finns på plats.",
        price: "1200 kr",
        location: "Stockholm, Hägersten",
        time: "Helgdag",
        category: "painting",
        skills: &["Måleri", "Renovering"],
        match_score: 88,
        author: "Sofia",
        date: "2 dagar sedan",
        icon: "fas fa-paint-roller",
    },
    SeedJob {
        id: 6,
        title: "Hjälp med flytt",
        description: "Behöver hjälp att bära möbler och kartonger från 3:e våningen (hiss finns).",
        price: "900 kr",
        location: "Stockholm, Bromma",
        time: "Halvdag",
        category: "moving",
        skills: &["Flytt", "Lastning"],
        match_score: 91,
        author: "Johan",
        date: "2 dagar sedan",
        icon: "fas fa-box-open",
    },
];

const CATEGORIES: &[(&str, &str, &str, u32)] = &[
    ("assembly", "Montering", "fas fa-tools", 24),
    ("moving", "Flytt & Transport", "fas fa-truck-moving", 18),
    ("tech", "Teknikhjälp", "fas fa-laptop", 32),
    ("cleaning", "Städning", "fas fa-broom", 15),
    ("garden", "Trädgård", "fas fa-leaf", 12),
    ("repair", "Reparation", "fas fa-wrench", 9),
    ("painting", "Måleri", "fas fa-paint-roller", 11),
    ("other", "Övrigt", "fas fa-tasks", 7),
];

/// The fixed job list loaded at startup. Scores are the placeholder values
/// shown before the scorer has run.
pub fn sample_jobs() -> Vec<Job> {
    SAMPLE_JOBS
        .iter()
        .map(|s| Job {
            id: s.id,
            title: s.title.to_string(),
            description: s.description.to_string(),
            price: s.price.to_string(),
            location: s.location.to_string(),
            time: s.time.to_string(),
            category: s.category.to_string(),
            skills: s.skills.iter().map(|k| k.to_string()).collect(),
            author: s.author.to_string(),
            date: s.date.to_string(),
            icon: s.icon.to_string(),
            match_score: s.match_score,
        })
        .collect()
}

pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(id, name, icon, count)| Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            count: *count,
        })
        .collect()
}
