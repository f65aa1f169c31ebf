mod quiz;

use dotenv::dotenv;
use quiz::grading::{grade, Submission};
use quiz::reactivity::METALS;
use quiz::{Question, QuizSession};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ParseMode},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveQuizStart,
    ReceiveRankingPick {
        quiz: QuizSession,
        picks: Vec<String>,
    },
    ReceiveExtremalAnswer {
        quiz: QuizSession,
        picks: Vec<String>,
    },
    ReceiveConceptAnswer {
        quiz: QuizSession,
        picks: Vec<String>,
        extremal: String,
    },
    ReceiveEquationAnswer {
        quiz: QuizSession,
        picks: Vec<String>,
        extremal: String,
        concept: String,
    },
}

type QuizStateStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    dotenv().expect("Failed to load .env file");

    pretty_env_logger::init();
    log::info!("Starting reactivity quiz bot...");

    let bot = Bot::from_env();

    println!("Establishing connection to the database...");
    let storage: QuizStateStorage = SqliteStorage::open("db.sqlite", Json)
        .await
        .unwrap()
        .erase();
    println!("Connection established");

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveQuizStart].endpoint(receive_quiz_start))
            .branch(
                dptree::case![State::ReceiveRankingPick { quiz, picks }]
                    .endpoint(receive_ranking_pick),
            )
            .branch(
                dptree::case![State::ReceiveExtremalAnswer { quiz, picks }]
                    .endpoint(receive_extremal_answer),
            )
            .branch(
                dptree::case![State::ReceiveConceptAnswer {
                    quiz,
                    picks,
                    extremal
                }]
                .endpoint(receive_concept_answer),
            )
            .branch(
                dptree::case![State::ReceiveEquationAnswer {
                    quiz,
                    picks,
                    extremal,
                    concept
                }]
                .endpoint(receive_equation_answer),
            ),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Hi! I'm the metal reactivity quiz bot. I'll rank four metals by reactivity at random, show you their displacement table, and you'll work the hidden order out from it. Ready?";
const START_QUIZ: &str = "Start the test";

// Prompt wording per ranking position, most reactive first
const RANKING_POSITIONS: [&str; 4] = [
    "most reactive",
    "second most reactive",
    "third most reactive",
    "least reactive",
];

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(vec![vec![KeyboardButton::new(START_QUIZ)]]);
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(keyboard)
        .await?;

    dialogue.update(State::ReceiveQuizStart).await?;
    Ok(())
}

async fn receive_quiz_start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    if msg.text() != Some(START_QUIZ) {
        let keyboard = KeyboardMarkup::new(vec![vec![KeyboardButton::new(START_QUIZ)]]);
        bot.send_message(msg.chat.id, "Please use the button to start the test")
            .reply_markup(keyboard)
            .await?;
        return Ok(());
    }

    // Every random choice of the attempt is rolled here, once. The handlers
    // below only read the session back from the dialogue storage, so asking
    // a question twice can never change its answer.
    let quiz = QuizSession::generate();
    log::debug!("Generated a quiz session: {:?}", quiz.ranks);

    let intro = format!(
        "<b>Metal Reactivity Test</b>\n\nFour metals A, B, C and D were ranked by reactivity at random.\nThe table shows what happens when the row metal is added to a nitrate solution of the column metal (R = reaction, · = no reaction):\n\n<pre>{}</pre>",
        quiz.ranks.render_table()
    );
    bot.send_message(msg.chat.id, intro)
        .parse_mode(ParseMode::Html)
        .await?;

    ask_ranking_pick(&bot, &msg, 0).await?;

    dialogue
        .update(State::ReceiveRankingPick {
            quiz,
            picks: Vec::new(),
        })
        .await?;
    Ok(())
}

async fn receive_ranking_pick(
    bot: Bot,
    dialogue: QuizDialogue,
    (quiz, picks): (QuizSession, Vec<String>),
    msg: Message,
) -> HandlerResult {
    let pick = match msg.text() {
        Some(text) if METALS.contains(&text) => text.to_string(),
        _ => {
            // Off-keyboard input: re-ask the same position, session untouched
            ask_ranking_pick(&bot, &msg, picks.len()).await?;
            return Ok(());
        }
    };

    // Duplicate picks are let through on purpose; grading reports them
    let mut picks = picks;
    picks.push(pick);

    if picks.len() < METALS.len() {
        ask_ranking_pick(&bot, &msg, picks.len()).await?;
        dialogue
            .update(State::ReceiveRankingPick { quiz, picks })
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, format!("Question 2 — {}", quiz.extremal.prompt()))
        .reply_markup(metals_keyboard())
        .await?;

    dialogue
        .update(State::ReceiveExtremalAnswer { quiz, picks })
        .await?;
    Ok(())
}

async fn receive_extremal_answer(
    bot: Bot,
    dialogue: QuizDialogue,
    (quiz, picks): (QuizSession, Vec<String>),
    msg: Message,
) -> HandlerResult {
    let extremal = match msg.text() {
        Some(text) if METALS.contains(&text) => text.to_string(),
        _ => {
            bot.send_message(msg.chat.id, "Please choose one of the metals")
                .reply_markup(metals_keyboard())
                .await?;
            return Ok(());
        }
    };

    ask_question(&bot, &msg, 3, &quiz.concept).await?;

    dialogue
        .update(State::ReceiveConceptAnswer {
            quiz,
            picks,
            extremal,
        })
        .await?;
    Ok(())
}

async fn receive_concept_answer(
    bot: Bot,
    dialogue: QuizDialogue,
    (quiz, picks, extremal): (QuizSession, Vec<String>, String),
    msg: Message,
) -> HandlerResult {
    let concept = match msg.text() {
        Some(text) if quiz.concept.has_option(text) => text.to_string(),
        _ => {
            ask_question(&bot, &msg, 3, &quiz.concept).await?;
            return Ok(());
        }
    };

    ask_question(&bot, &msg, 4, &quiz.equation).await?;

    dialogue
        .update(State::ReceiveEquationAnswer {
            quiz,
            picks,
            extremal,
            concept,
        })
        .await?;
    Ok(())
}

async fn receive_equation_answer(
    bot: Bot,
    dialogue: QuizDialogue,
    (quiz, picks, extremal, concept): (QuizSession, Vec<String>, String, String),
    msg: Message,
) -> HandlerResult {
    let equation = match msg.text() {
        Some(text) if quiz.equation.has_option(text) => text.to_string(),
        _ => {
            ask_question(&bot, &msg, 4, &quiz.equation).await?;
            return Ok(());
        }
    };

    let submission = Submission {
        ranking: picks,
        extremal,
        concept,
        equation,
    };
    let report = grade(&quiz, &submission);
    log::info!("Graded an attempt: {}/{}", report.score, report.total);

    let keyboard = KeyboardMarkup::new(vec![vec![KeyboardButton::new(START_QUIZ)]]);
    let feedback = format!(
        "{}\n\n{}\nWant to try again with a fresh ordering?",
        report.lines.join("\n"),
        report.summary()
    );
    bot.send_message(msg.chat.id, feedback)
        .reply_markup(keyboard)
        .await?;

    dialogue.update(State::ReceiveQuizStart).await?;
    Ok(())
}

async fn ask_ranking_pick(bot: &Bot, msg: &Message, position: usize) -> HandlerResult {
    let prompt = format!(
        "Question 1 — rank the metals from most to least reactive.\nWhich metal is the {}?",
        RANKING_POSITIONS[position]
    );
    bot.send_message(msg.chat.id, prompt)
        .reply_markup(metals_keyboard())
        .await?;
    Ok(())
}

async fn ask_question(bot: &Bot, msg: &Message, number: usize, question: &Question) -> HandlerResult {
    bot.send_message(msg.chat.id, format!("Question {} — {}", number, question.text))
        .reply_markup(options_keyboard(question))
        .await?;
    Ok(())
}

fn metals_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![METALS
        .iter()
        .map(|metal| KeyboardButton::new(*metal))
        .collect::<Vec<_>>()])
}

fn options_keyboard(question: &Question) -> KeyboardMarkup {
    KeyboardMarkup::new(
        question
            .answers
            .iter()
            .map(|answer| vec![KeyboardButton::new(answer.text.clone())])
            .collect::<Vec<_>>(),
    )
}
