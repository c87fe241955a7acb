//! Seed data.
//!
//! [`seed_posts`] is the fixed collection served when nothing has been stored
//! yet. [`generate_posts`] builds extra sample posts for demos.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use postboard_core::{NewPost, Post, PostId};

use crate::ids::IdGenerator;

/// Window in which generated posts are backdated.
const GENERATED_SPREAD_DAYS: i64 = 30;

const SAMPLE_TITLES: &[&str] = &[
    "Python para Iniciantes: Primeiros Passos",
    "Banco de Dados: SQL vs NoSQL",
    "Segurança Web: Principais Vulnerabilidades",
    "Docker: Containerização de Aplicações",
    "APIs RESTful: Melhores Práticas",
    "Testes Automatizados com Jest",
    "Algoritmos de Ordenação Explicados",
    "Estruturas de Dados Fundamentais",
    "Design Patterns em JavaScript",
    "Microserviços: Arquitetura Moderna",
];

const SAMPLE_AUTHORS: &[&str] = &[
    "Prof. João Silva",
    "Profa. Maria Santos",
    "Prof. Pedro Oliveira",
    "Profa. Ana Costa",
    "Prof. Carlos Lima",
];

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

struct SeedPost {
    id: &'static str,
    title: &'static str,
    content: &'static str,
    description: &'static str,
    author: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SeedPost> for Post {
    fn from(seed: SeedPost) -> Self {
        Self {
            id: PostId::new(seed.id),
            title: seed.title.to_owned(),
            content: seed.content.to_owned(),
            description: Some(seed.description.to_owned()),
            author: seed.author.to_owned(),
            created_at: seed.created_at,
            updated_at: seed.updated_at,
        }
    }
}

/// The fixed starting collection, newest first.
#[must_use]
pub fn seed_posts() -> Vec<Post> {
    [
        SeedPost {
            id: "1",
            title: "Introdução à Programação Orientada a Objetos",
            content: "A Programação Orientada a Objetos (POO) organiza o código em objetos que \
                      representam entidades do mundo real.\n\n\
                      ## Conceitos Fundamentais\n\n\
                      - **Classe**: o modelo que define características e comportamentos\n\
                      - **Objeto**: uma instância específica de uma classe\n\
                      - **Encapsulamento**, **Herança** e **Polimorfismo**\n\n\
                      ```javascript\nclass Pessoa {\n  constructor(nome) { this.nome = nome; }\n}\n```\n",
            description: "Uma introdução completa aos conceitos fundamentais da Programação Orientada a Objetos.",
            author: "Prof. Carlos Silva",
            created_at: utc(2024, 5, 20, 10, 30),
            updated_at: utc(2024, 5, 20, 10, 30),
        },
        SeedPost {
            id: "2",
            title: "React Hooks: Guia Completo para Iniciantes",
            content: "Hooks permitem usar estado e ciclo de vida em componentes funcionais.\n\n\
                      ## useState\n\n\
                      ```javascript\nconst [count, setCount] = useState(0);\n```\n\n\
                      ## useEffect\n\n\
                      Executa efeitos colaterais depois da renderização.\n",
            description: "Aprenda a usar React Hooks de forma eficiente com exemplos práticos.",
            author: "Profa. Ana Rodrigues",
            created_at: utc(2024, 5, 18, 14, 15),
            updated_at: utc(2024, 5, 19, 9, 20),
        },
        SeedPost {
            id: "3",
            title: "CSS Grid vs Flexbox: Quando Usar Cada Um",
            content: "CSS Grid e Flexbox são ferramentas de layout complementares.\n\n\
                      - **Flexbox**: layouts em uma dimensão (linha ou coluna)\n\
                      - **Grid**: layouts em duas dimensões\n\n\
                      ```css\n.container { display: grid; grid-template-columns: repeat(3, 1fr); }\n```\n",
            description: "Entenda as diferenças entre CSS Grid e Flexbox e quando usar cada ferramenta.",
            author: "Prof. Ricardo Santos",
            created_at: utc(2024, 5, 15, 16, 45),
            updated_at: utc(2024, 5, 15, 16, 45),
        },
        SeedPost {
            id: "4",
            title: "Introdução ao Git e GitHub",
            content: "Git é um sistema de controle de versão distribuído.\n\n\
                      ## Comandos Básicos\n\n\
                      ```bash\ngit init\ngit add .\ngit commit -m \"primeiro commit\"\ngit push origin main\n```\n",
            description: "Aprenda os fundamentos do Git e GitHub para controle de versão eficiente.",
            author: "Prof. Lucas Oliveira",
            created_at: utc(2024, 5, 12, 11, 20),
            updated_at: utc(2024, 5, 12, 11, 20),
        },
        SeedPost {
            id: "5",
            title: "JavaScript ES6+: Recursos Modernos que Você Deve Conhecer",
            content: "O ES6 trouxe recursos que tornam o JavaScript mais expressivo.\n\n\
                      - Arrow functions e template literals\n\
                      - Destructuring e spread\n\
                      - Módulos, Promises e async/await\n\n\
                      ```javascript\nconst soma = (a, b) => a + b;\n```\n",
            description: "Explore os recursos mais importantes do JavaScript moderno (ES6+) com exemplos práticos.",
            author: "Profa. Fernanda Costa",
            created_at: utc(2024, 5, 10, 13, 30),
            updated_at: utc(2024, 5, 11, 8, 15),
        },
    ]
    .into_iter()
    .map(Post::from)
    .collect()
}

/// Build `count` sample posts with random titles, authors and creation dates
/// within the last 30 days before `now`.
pub fn generate_posts<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    ids: &IdGenerator,
    rng: &mut R,
) -> Vec<Post> {
    let spread_ms = Duration::days(GENERATED_SPREAD_DAYS).num_milliseconds();

    (0..count)
        .map(|_| {
            let title = SAMPLE_TITLES.choose(rng).copied().unwrap_or_default();
            let author = SAMPLE_AUTHORS.choose(rng).copied().unwrap_or_default();
            let created_at = now - Duration::milliseconds(rng.random_range(0..spread_ms));
            let topic = title.to_lowercase();

            let data = NewPost::new(
                title,
                format!(
                    "Este é um post de exemplo sobre {topic}.\n\n\
                     ## Introdução\n\n\
                     Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\n\
                     ## Conclusão\n\n\
                     Duis aute irure dolor in reprehenderit in voluptate velit esse."
                ),
            )
            .with_author(author)
            .with_description(format!(
                "Uma introdução abrangente sobre {topic} com exemplos práticos."
            ));

            Post::create(ids.next_id(now), data, created_at)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_seed_is_newest_first_with_unique_ids() {
        let posts = seed_posts();
        assert_eq!(posts.len(), 5);

        let ids: HashSet<_> = posts.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), posts.len());

        assert!(posts.windows(2).all(|w| w[0].created_at > w[1].created_at));
        assert!(posts.iter().all(|p| p.created_at <= p.updated_at));
    }

    #[test]
    fn test_generated_posts_are_recent_and_unique() {
        let now = Utc::now();
        let ids = IdGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);

        let posts = generate_posts(8, now, &ids, &mut rng);
        assert_eq!(posts.len(), 8);

        let unique: HashSet<_> = posts.iter().map(|p| p.id.clone()).collect();
        assert_eq!(unique.len(), 8);

        for post in &posts {
            assert!(post.created_at <= now);
            assert!(post.created_at > now - Duration::days(GENERATED_SPREAD_DAYS));
            assert_eq!(post.created_at, post.updated_at);
            assert!(SAMPLE_TITLES.contains(&post.title.as_str()));
            assert!(SAMPLE_AUTHORS.contains(&post.author.as_str()));
        }
    }
}
