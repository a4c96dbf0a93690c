use crate::{
    components::common::{Button, ButtonVariant},
    pages::{employees::components::form::TextField, profile::view_model::ProfileViewModel},
};
use leptos::*;

#[component]
pub fn ProfileEditForm(vm: ProfileViewModel) -> impl IntoView {
    let state = vm.form_state;
    let pending = vm.update_action.pending();
    view! {
        <form
            class="space-y-4"
            on:submit=move |ev| {
                ev.prevent_default();
                vm.save();
            }
        >
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                <TextField label="電話番号" value=state.phone input_type="tel"/>
                <TextField label="住所" value=state.address/>
                <TextField label="緊急連絡先" value=state.emergency_contact_name/>
                <TextField
                    label="緊急連絡先の電話番号"
                    value=state.emergency_contact_phone
                    input_type="tel"
                />
            </div>
            <div class="flex justify-end gap-2">
                <Button variant=ButtonVariant::Secondary on:click=move |_| vm.editing.set(false)>
                    "キャンセル"
                </Button>
                <button
                    type="submit"
                    class=format!(
                        "inline-flex items-center rounded-md px-4 py-2 text-sm font-semibold disabled:opacity-50 {}",
                        ButtonVariant::Primary.classes(),
                    )
                    disabled=move || pending.get()
                >
                    "保存"
                </button>
            </div>
        </form>
    }
}
