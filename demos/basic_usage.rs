use statusdb::domain::entity::HostStatus;
use statusdb::infrastructure::render::{render, OutputFormat};
use statusdb::infrastructure::schema::{hosts_table, HOSTS_TABLE};
use statusdb::infrastructure::storage::MemoryStatusStore;
use chrono::Duration;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== StatusDB 基本動作チェック ===\n");

    // 1. ストアの初期化とホストの投入
    println!("1. ホストの投入");
    let store = Arc::new(MemoryStatusStore::new());
    store.set_default_contact_groups(vec!["admins".to_string()]);

    store.add_host(
        HostStatus::builder()
            .name("web01")
            .address("10.0.0.1")
            .contacts(vec!["alice".to_string(), "bob".to_string()])
            .groups(vec!["web".to_string()])
            .tags(" linux , nginx ,frontend ")
            .build(),
    )?;
    store.add_host(
        HostStatus::builder()
            .name("db01")
            .address("10.0.0.2")
            .contacts(vec!["carol".to_string()])
            .groups(vec!["database".to_string()])
            .tags("linux,postgres")
            .build(),
    )?;
    println!("{}台のホストを投入しました\n", store.host_count());

    // 2. スキーマの構築
    println!("2. テーブル '{}' のスキーマ構築", HOSTS_TABLE);
    let table = hosts_table(&store)?;
    println!("カラム: {:?}\n", table.column_names());

    // 3. CSV描画
    println!("3. CSV描画");
    let rows = store.host_rows();
    let csv = render(&table, &rows, None, Duration::zero(), OutputFormat::Csv)?;
    print!("{}", csv);
    println!();

    // 4. 参照カラムはストアの更新を次のクエリで観測する
    println!("4. 既定コンタクトグループの更新");
    store.set_default_contact_groups(vec!["admins".to_string(), "oncall".to_string()]);
    let csv = render(&table, &rows, None, Duration::zero(), OutputFormat::Csv)?;
    print!("{}", csv);
    println!();

    // 5. JSON描画
    println!("5. JSON描画");
    let json = render(&table, &rows, None, Duration::zero(), OutputFormat::Json)?;
    println!("{}\n", json);

    println!("テスト完了！");

    Ok(())
}
