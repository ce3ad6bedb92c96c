//! # Seed Data
//!
//! The fixed dataset the app starts from. Conversation timestamps are relative
//! to `now` so the demo always looks fresh.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::core::achievements::{Badge, Progress, Rarity};
use crate::core::conversation::{
    Attachment, AttachmentKind, Conversation, DeliveryStatus, Message, Sender,
};
use crate::core::history::{Exchange, ExchangeStatus};
use crate::core::matches::{Match, MatchStatus, SuggestedMatch};
use crate::core::network::Connection;
use crate::core::reviews::{Reply, Review};

pub const DEMO_CONVERSATION_ID: &str = "1";
pub const DEMO_REPLY_TEXT: &str = "Perfeito! Amanhã às 15h funciona para você?";

fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}

fn read(id: &str, sender: Sender, text: &str, at: DateTime<Utc>) -> Message {
    Message::new(id, sender, text, at, DeliveryStatus::Read)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// Dates below are literals known to be valid.
fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    vec![
        Conversation {
            id: DEMO_CONVERSATION_ID.into(),
            partner: "João Silva".into(),
            partner_avatar: "https://i.pravatar.cc/150?img=3".into(),
            skill: "React & TypeScript".into(),
            last_message: "Vamos marcar a sessão para amanhã?".into(),
            last_message_time: minutes_ago(now, 5),
            unread: 2,
            is_online: true,
            typing: true,
            messages: vec![
                read("101", Sender::Them, "Olá! Estou interessado na troca de habilidades", minutes_ago(now, 60)),
                read("102", Sender::Me, "Oi João! Claro, o que você precisa saber sobre React?", minutes_ago(now, 45)),
                read("103", Sender::Them, "Queria entender melhor sobre hooks customizados", minutes_ago(now, 30)),
                read("104", Sender::Them, "Vamos marcar a sessão para amanhã?", minutes_ago(now, 5))
                    .with_attachments(vec![
                        Attachment::new(AttachmentKind::Document, "/sample.pdf").with_name("roteiro.pdf"),
                    ]),
            ],
        },
        Conversation {
            id: "2".into(),
            partner: "Maria Souza".into(),
            partner_avatar: "https://i.pravatar.cc/150?img=5".into(),
            skill: "UI/UX Design".into(),
            last_message: "Enviei os wireframes para revisão".into(),
            last_message_time: minutes_ago(now, 120),
            unread: 0,
            is_online: false,
            typing: false,
            messages: vec![
                read("201", Sender::Them, "Oi! Podemos conversar sobre o projeto?", minutes_ago(now, 180)),
                read("202", Sender::Me, "Claro! Que aspectos do UI/Design você quer discutir?", minutes_ago(now, 150)),
                read("203", Sender::Them, "Enviei os wireframes para revisão", minutes_ago(now, 120))
                    .with_attachments(vec![Attachment::new(
                        AttachmentKind::Image,
                        "https://images.unsplash.com/photo-1547658719-da2b51169166",
                    )]),
            ],
        },
        Conversation {
            id: "3".into(),
            partner: "Carlos Oliveira".into(),
            partner_avatar: "https://i.pravatar.cc/150?img=8".into(),
            skill: "Node.js Backend".into(),
            last_message: "Obrigado pela ajuda com o MongoDB!".into(),
            last_message_time: minutes_ago(now, 60 * 24),
            unread: 0,
            is_online: true,
            typing: false,
            messages: vec![
                read("301", Sender::Me, "Oi Carlos, como vai o projeto?", minutes_ago(now, 60 * 26)),
                read("302", Sender::Them, "Estou com um problema nas queries do MongoDB", minutes_ago(now, 60 * 25)),
                read("303", Sender::Me, "Posso te ajudar com isso, vamos fazer uma chamada?", minutes_ago(now, 60 * 24))
                    .with_attachments(vec![Attachment::new(
                        AttachmentKind::Image,
                        "https://images.unsplash.com/photo-1551288049-bebda4e38f71",
                    )]),
                read("304", Sender::Them, "Obrigado pela ajuda com o MongoDB!", minutes_ago(now, 60 * 24)),
            ],
        },
    ]
}

pub fn matches() -> Vec<Match> {
    vec![
        Match {
            id: "1".into(),
            partner_name: "Ana Silva".into(),
            your_skills: strings(&["Design", "UI/UX"]),
            partner_skills: strings(&["Front-end", "React"]),
            compatibility: 85,
            status: MatchStatus::New,
            last_interaction: None,
            bio: Some("Designer com 5 anos de experiência em produtos digitais, apaixonada por criar interfaces intuitivas e bonitas.".into()),
            shared_interests: strings(&["Design Systems", "Acessibilidade", "Figma"]),
        },
        Match {
            id: "2".into(),
            partner_name: "Carlos Oliveira".into(),
            your_skills: strings(&["Back-end", "Node.js"]),
            partner_skills: strings(&["DevOps", "Cloud"]),
            compatibility: 72,
            status: MatchStatus::InProgress,
            last_interaction: Some("2 dias atrás".into()),
            bio: Some("Engenheiro de DevOps com experiência em AWS e arquitetura de sistemas escaláveis.".into()),
            shared_interests: strings(&["Microserviços", "Typescript"]),
        },
        Match {
            id: "3".into(),
            partner_name: "Mariana Costa".into(),
            your_skills: strings(&["Marketing", "Redes Sociais"]),
            partner_skills: strings(&["Copywriting", "Branding"]),
            compatibility: 91,
            status: MatchStatus::Completed,
            last_interaction: Some("1 semana atrás".into()),
            bio: Some("Especialista em Marketing Digital e Growth Hacking, com cases de sucesso em startups.".into()),
            shared_interests: strings(&["Growth", "Conteúdo", "Métricas"]),
        },
    ]
}

pub fn suggested_matches() -> Vec<SuggestedMatch> {
    vec![
        SuggestedMatch {
            id: "s1".into(),
            partner_name: "João Santos".into(),
            your_missing_skills: strings(&["Mobile Development"]),
            partner_missing_skills: strings(&["UI Design"]),
            potential_compatibility: 78,
            mutual_connections: Some(3),
        },
        SuggestedMatch {
            id: "s2".into(),
            partner_name: "Beatriz Rocha".into(),
            your_missing_skills: strings(&["Data Science"]),
            partner_missing_skills: strings(&["Product Management"]),
            potential_compatibility: 82,
            mutual_connections: Some(2),
        },
    ]
}

pub fn reviews() -> Vec<Review> {
    vec![
        Review {
            id: "1".into(),
            author: "Carlos Oliveira".into(),
            role: "Front-end Developer".into(),
            rating: 5.0,
            comment: "Excelente profissional! As aulas foram muito bem estruturadas e o conteúdo foi passado de forma clara e objetiva. Super recomendo!".into(),
            date: date(2023, 6, 15),
            likes: 24,
            liked: true,
            replies: vec![Reply {
                id: "1-1".into(),
                author: "Você".into(),
                comment: "Muito obrigada pelo feedback, Carlos! Foi um prazer trabalhar com você.".into(),
                date: date(2023, 6, 16),
            }],
        },
        Review {
            id: "2".into(),
            author: "Mariana Costa".into(),
            role: "UX Designer".into(),
            rating: 4.5,
            comment: "Ótima didática e domínio do conteúdo. Algumas vezes atrasou uns 10 minutos, mas no geral foi uma ótima experiência de aprendizado.".into(),
            date: date(2023, 5, 20),
            likes: 12,
            liked: false,
            replies: Vec::new(),
        },
        Review {
            id: "3".into(),
            author: "João Santos".into(),
            role: "Product Manager".into(),
            rating: 4.8,
            comment: "Profissional muito competente e flexível com os horários. Adaptou o conteúdo às minhas necessidades específicas.".into(),
            date: date(2023, 4, 10),
            likes: 18,
            liked: false,
            replies: Vec::new(),
        },
    ]
}

pub fn exchanges() -> Vec<Exchange> {
    vec![
        Exchange {
            date: date(2023, 10, 15),
            partner: "João Silva".into(),
            skills: strings(&["React", "TypeScript"]),
            status: ExchangeStatus::Completed,
            rating: Some(5),
        },
        Exchange {
            date: date(2023, 10, 18),
            partner: "Maria Souza".into(),
            skills: strings(&["Node.js", "MongoDB"]),
            status: ExchangeStatus::Completed,
            rating: Some(4),
        },
        Exchange {
            date: date(2023, 10, 20),
            partner: "Carlos Oliveira".into(),
            skills: strings(&["UI Design", "Figma"]),
            status: ExchangeStatus::Pending,
            rating: None,
        },
        Exchange {
            date: date(2023, 10, 22),
            partner: "Ana Santos".into(),
            skills: strings(&["Python", "Data Analysis"]),
            status: ExchangeStatus::Completed,
            rating: Some(5),
        },
        Exchange {
            date: date(2023, 10, 25),
            partner: "Pedro Costa".into(),
            skills: strings(&["React Native", "Firebase"]),
            status: ExchangeStatus::Cancelled,
            rating: None,
        },
    ]
}

fn connection(
    id: &str,
    name: &str,
    role: &str,
    location: &str,
    skills: &[&str],
    mutual_connections: u32,
    connected_on: Option<NaiveDate>,
) -> Connection {
    Connection {
        id: id.into(),
        name: name.into(),
        role: role.into(),
        location: location.into(),
        skills: strings(skills),
        mutual_connections,
        connected_on,
    }
}

pub fn connections() -> Vec<Connection> {
    vec![
        connection(
            "1",
            "Carlos Oliveira",
            "Front-end Developer",
            "São Paulo, SP",
            &["React", "TypeScript", "UI Design"],
            5,
            Some(date(2023, 5, 15)),
        ),
        connection(
            "2",
            "Mariana Costa",
            "UX Designer",
            "Rio de Janeiro, RJ",
            &["Figma", "User Research", "Prototyping"],
            3,
            Some(date(2023, 4, 22)),
        ),
        connection(
            "3",
            "João Santos",
            "Product Manager",
            "Belo Horizonte, MG",
            &["Agile", "Scrum", "Product Strategy"],
            7,
            Some(date(2023, 3, 10)),
        ),
    ]
}

pub fn suggested_connections() -> Vec<Connection> {
    vec![
        connection(
            "s1",
            "Ana Silva",
            "Back-end Developer",
            "Curitiba, PR",
            &["Node.js", "Python", "API Design"],
            2,
            None,
        ),
        connection(
            "s2",
            "Pedro Rocha",
            "DevOps Engineer",
            "Porto Alegre, RS",
            &["AWS", "Docker", "CI/CD"],
            4,
            None,
        ),
    ]
}

fn badge(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    rarity: Rarity,
    unlocked_on: Option<NaiveDate>,
    progress: Option<(u32, u32)>,
) -> Badge {
    Badge {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        rarity,
        unlocked_on,
        progress: progress.map(|(current, total)| Progress { current, total }),
    }
}

pub fn badges() -> Vec<Badge> {
    vec![
        badge(
            "1",
            "Iniciante",
            "Complete sua primeira troca de habilidades",
            "🌟",
            Rarity::Common,
            Some(date(2023, 9, 15)),
            None,
        ),
        badge(
            "2",
            "Socializador",
            "Conecte-se com 5 parceiros diferentes",
            "🤝",
            Rarity::Common,
            Some(date(2023, 10, 1)),
            None,
        ),
        badge(
            "3",
            "Mestre em React",
            "Complete 10 trocas envolvendo React",
            "⚛",
            Rarity::Rare,
            None,
            Some((8, 10)),
        ),
        badge(
            "4",
            "Poliglota Tech",
            "Troque habilidades em 3 linguagens diferentes",
            "🌐",
            Rarity::Epic,
            None,
            Some((1, 3)),
        ),
        badge(
            "5",
            "SkillSwap Master",
            "Top 1% dos usuários mais ativos da plataforma",
            "🏆",
            Rarity::Legendary,
            None,
            None,
        ),
        badge(
            "6",
            "Mentor",
            "Ajude 3 iniciantes em suas primeiras trocas",
            "🎓",
            Rarity::Rare,
            Some(date(2023, 10, 10)),
            None,
        ),
        badge(
            "7",
            "Full Stack",
            "Troque habilidades em frontend e backend",
            "💻",
            Rarity::Epic,
            Some(date(2023, 10, 18)),
            None,
        ),
        badge(
            "8",
            "Maratona Tech",
            "Complete 5 trocas em uma semana",
            "🏃",
            Rarity::Rare,
            None,
            Some((3, 5)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_thread_is_first_and_typing() {
        let convs = conversations(Utc::now());
        assert_eq!(convs[0].id, DEMO_CONVERSATION_ID);
        assert!(convs[0].typing);
        assert_eq!(convs[0].messages.len(), 4);
    }

    #[test]
    fn seed_previews_match_last_message() {
        for conv in conversations(Utc::now()) {
            let last = conv.last().unwrap();
            assert_eq!(conv.last_message, last.text, "conversation {}", conv.id);
        }
    }
}
