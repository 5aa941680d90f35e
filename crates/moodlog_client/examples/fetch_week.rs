use chrono::{Duration, Utc};
use moodlog_client::{
    DateRange, MoodlogClient, config::Config, http_client::ReqwestMoodlogClient,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects MOODLOG_ACCESS_TOKEN in env
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = ReqwestMoodlogClient::from_config(cfg);

    let today = Utc::now().date_naive();
    let range = DateRange::new(today - Duration::days(6), today);
    let records = client.get_emotion_statistics(range).await?;
    for record in records {
        println!(
            "{}: delight={} calm={} anxiety={}",
            record.date, record.scores.delight, record.scores.calm, record.scores.anxiety
        );
    }
    Ok(())
}
