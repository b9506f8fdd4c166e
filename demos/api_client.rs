use reqwest::Client;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = "http://localhost:6557";

    println!("=== StatusDB API テスト ===\n");

    // 1. ヘルスチェック
    println!("1. ヘルスチェック");
    let resp = client.get(format!("{}/health", base_url)).send().await?;
    println!("ステータス: {}", resp.status());
    println!();

    // 2. テーブル一覧取得
    println!("2. テーブル一覧取得");
    let resp = client.get(format!("{}/api/tables", base_url)).send().await?;
    println!("ステータス: {}", resp.status());
    println!("レスポンス: {}", resp.text().await?);
    println!();

    // 3. テーブル詳細取得
    println!("3. テーブル詳細取得");
    let resp = client
        .get(format!("{}/api/tables/hosts", base_url))
        .send()
        .await?;
    println!("ステータス: {}", resp.status());
    let result_text = resp.text().await?;

    // JSON形式のレスポンスをきれいに表示
    if let Ok(result) = serde_json::from_str::<Value>(&result_text) {
        println!("整形レスポンス: {}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("レスポンス: {}", result_text);
    }
    println!();

    // 4. CSVでのデータ取得
    println!("4. データ取得 (CSV)");
    let resp = client
        .get(format!("{}/api/tables/hosts/data", base_url))
        .send()
        .await?;
    println!("ステータス: {}", resp.status());
    println!("レスポンス:\n{}", resp.text().await?);

    // 5. JSONでのデータ取得
    println!("5. データ取得 (JSON)");
    let resp = client
        .get(format!("{}/api/tables/hosts/data?format=json", base_url))
        .send()
        .await?;
    println!("ステータス: {}", resp.status());
    let result_text = resp.text().await?;
    if let Ok(result) = serde_json::from_str::<Value>(&result_text) {
        println!("整形レスポンス: {}", serde_json::to_string_pretty(&result)?);
    }
    println!();

    // 6. 認可ユーザーとタイムゾーンを指定しても結果は変わらない
    println!("6. 認可ユーザー付きのデータ取得");
    let resp = client
        .get(format!(
            "{}/api/tables/hosts/data?user=monitoring&timezone_offset=7200",
            base_url
        ))
        .send()
        .await?;
    println!("ステータス: {}", resp.status());
    println!("レスポンス:\n{}", resp.text().await?);

    // 7. 未対応フォーマットはエラーになる
    println!("7. 未対応フォーマットの確認");
    let resp = client
        .get(format!("{}/api/tables/hosts/data?format=xml", base_url))
        .send()
        .await?;
    println!("ステータス: {}", resp.status());
    println!("レスポンス: {}", resp.text().await?);
    println!();

    println!("APIテスト完了！");

    Ok(())
}
