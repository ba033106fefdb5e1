//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::{events::LogEvent, states::AppState};
use crate::data::schema::{Item, ItemCatalog};
use crate::inventory::{components::Inventory, events::*};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Ok(mut buf) = buffer.lock() {
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(name)=查看单个模板
    Give { name: String, count: u32 },
    Remove { identity: String, amount: i32 },
    Inventory,
    Select(usize),
    Find(String),
    Save,
    Load,
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

#[allow(clippy::too_many_arguments)]
fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    catalog: Res<ItemCatalog>,
    inventory: Res<Inventory>,
    mut ev_give: EventWriter<GiveItemEvent>,
    mut ev_remove: EventWriter<RemoveItemEvent>,
    mut ev_refresh: EventWriter<RefreshDisplayEvent>,
    mut ev_select: EventWriter<SelectItemEvent>,
    mut ev_save: EventWriter<SaveInventoryEvent>,
    mut ev_load: EventWriter<LoadInventoryEvent>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(
                    "命令列表:
  help                        查看帮助
  status                      查看当前状态
  exit / quit                 退出程序
  items                       列出所有物品模板
  items <name>                查看单个模板
  give <name> [count]         给予物品
  remove <identity> [amount]  移除物品（可堆叠物品的 identity 就是名字）
  inventory                   刷新并查看背包
  select <index>              选中背包列表中的一行
  find <name>                 按名字在背包中查找
  save / load                 存档 / 读档
  ".into()));
            }

            Command::Status => {
                log.write(LogEvent(format!(
                    "State: {:?}, Templates: {}, Inventory: {}/{}{}",
                    state.get(),
                    catalog.len(),
                    inventory.len(),
                    inventory.capacity(),
                    if inventory.is_full() { " (full)" } else { "" }
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(None) => {
                for template in &catalog.items {
                    log.write(LogEvent(format!(
                        "{} | {}",
                        template.name,
                        if template.stackable { "stackable" } else { "unique" }
                    )));
                }
            }

            Command::Items(Some(name)) => match catalog.get(&name) {
                Some(template) => {
                    log.write(LogEvent(describe(template)));
                }
                None => {
                    log.write(LogEvent("未找到匹配物品".into()));
                }
            },

            Command::Give { name, count } => {
                ev_give.write(GiveItemEvent { name, count });
            }

            Command::Remove { identity, amount } => {
                ev_remove.write(RemoveItemEvent { identity, amount });
            }

            Command::Inventory => {
                ev_refresh.write(RefreshDisplayEvent);
            }

            Command::Select(index) => {
                ev_select.write(SelectItemEvent { index });
            }

            Command::Find(name) => match inventory.find_by_name(&name) {
                Some(item) => {
                    log.write(LogEvent(describe(item)));
                }
                None => {
                    log.write(LogEvent(format!("背包里没有 {name}")));
                }
            },

            Command::Save => {
                ev_save.write(SaveInventoryEvent);
            }

            Command::Load => {
                ev_load.write(LoadInventoryEvent);
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => Command::Items(parts.next().map(|s| s.to_string())),
        "give" => {
            let name = parts.next().unwrap_or("").to_string();
            let count = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Give { name, count }
        }
        "remove" | "rm" => {
            let identity = parts.next().unwrap_or("").to_string();
            let amount = parts.next().unwrap_or("1").parse().unwrap_or(1);
            Command::Remove { identity, amount }
        }
        "inventory" | "inv" => Command::Inventory,
        "select" | "sel" => Command::Select(parts.next().unwrap_or("0").parse().unwrap_or(0)),
        "find" => Command::Find(parts.next().unwrap_or("").to_string()),
        "save" => Command::Save,
        "load" => Command::Load,
        other => Command::Unsupported(other.into()),
    }
}

fn describe(item: &Item) -> String {
    let mut out = format!(
        "==================================================
Name     : {}
Identity : {}
Amount   : {}
Stack    : {}",
        item.name,
        if item.identity.is_empty() { "-" } else { item.identity.as_str() },
        item.amount,
        item.stackable
    );
    for p in item.properties() {
        out.push_str(&format!("\n  {} = {} {}", p.name, p.value, p.text));
    }
    out.push_str("\n==================================================");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_defaults() {
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("Q"), Command::Exit);
        assert_eq!(
            parse_command("give Gold 5"),
            Command::Give { name: "Gold".into(), count: 5 }
        );
        assert_eq!(
            parse_command("give Sword"),
            Command::Give { name: "Sword".into(), count: 1 }
        );
        assert_eq!(
            parse_command("rm Gold 8"),
            Command::Remove { identity: "Gold".into(), amount: 8 }
        );
        assert_eq!(parse_command("select 2"), Command::Select(2));
        assert_eq!(parse_command("items"), Command::Items(None));
        assert_eq!(parse_command("find potion"), Command::Find("potion".into()));
        assert_eq!(parse_command("dance"), Command::Unsupported("dance".into()));
    }

    #[test]
    fn describe_lists_properties_in_order() {
        use crate::data::schema::Property;
        let item = Item::new("Sword", false)
            .with_property(Property::new("damage", 12.0, ""))
            .with_property(Property::new("rarity", 0.0, "common"));
        let text = describe(&item);
        let damage = text.find("damage").unwrap();
        let rarity = text.find("rarity").unwrap();
        assert!(damage < rarity);
        assert!(text.contains("Identity : -"));
    }
}
