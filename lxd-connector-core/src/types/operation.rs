//! 面板操作及其默认文案

use serde::Serialize;

/// 一次面板操作（对应一次远端调用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    TestConnection,
    Create,
    Sync,
    Terminate,
    PowerOn,
    PowerOff,
    Reboot,
    Status,
    ResetPassword,
    Reinstall,
    ContainerInfo,
    AddNatRule,
    RemoveNatRule,
    ListNatRules,
    RemoteNatRules,
}

impl Operation {
    /// 节点未返回消息时的成功文案
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::TestConnection => "API连接正常",
            Self::Create => "创建成功",
            Self::Sync => "同步成功",
            Self::Terminate => "终止成功",
            Self::PowerOn => "开机成功",
            Self::PowerOff => "关机成功",
            Self::Reboot => "重启成功",
            Self::ResetPassword => "密码重置成功",
            Self::Reinstall => "重装成功",
            Self::AddNatRule => "NAT转发添加成功",
            Self::RemoveNatRule => "NAT转发删除成功",
            Self::Status | Self::ContainerInfo | Self::ListNatRules | Self::RemoteNatRules => "",
        }
    }

    /// 节点未返回消息时的失败文案
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::TestConnection => "无法连接到LXD API服务器",
            Self::Create => "创建失败",
            Self::Sync => "同步失败",
            Self::Terminate => "终止失败",
            Self::PowerOn => "开机失败",
            Self::PowerOff => "关机失败",
            Self::Reboot => "重启失败",
            Self::Status => "获取状态失败",
            Self::ResetPassword => "密码重置失败",
            Self::Reinstall => "重装失败",
            Self::ContainerInfo => "获取信息失败",
            Self::AddNatRule => "NAT转发添加失败",
            Self::RemoveNatRule => "NAT转发删除失败",
            Self::ListNatRules => "获取NAT列表失败",
            Self::RemoteNatRules => "获取节点NAT列表失败",
        }
    }

    /// 日志用名称
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TestConnection => "test_connection",
            Self::Create => "create",
            Self::Sync => "sync",
            Self::Terminate => "terminate",
            Self::PowerOn => "power_on",
            Self::PowerOff => "power_off",
            Self::Reboot => "reboot",
            Self::Status => "status",
            Self::ResetPassword => "reset_password",
            Self::Reinstall => "reinstall",
            Self::ContainerInfo => "container_info",
            Self::AddNatRule => "add_nat_rule",
            Self::RemoveNatRule => "remove_nat_rule",
            Self::ListNatRules => "list_nat_rules",
            Self::RemoteNatRules => "remote_nat_rules",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
