use bevy::prelude::*;

/// 控制台输出
#[derive(Event)]
pub struct LogEvent(pub String);

pub fn hello_world(mut writer: EventWriter<LogEvent>) {
    writer.write(LogEvent("背包系统已启动，输入 help 查看命令".into()));
}
